use std::collections::BTreeMap;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use gogr_ingest::{
    Dispatcher, Executor, FilenameSource, FlowControlConfig, IngestError, RunStats,
};
use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

/// Records every name it sees and emits `<name>:<i>` lines; names starting with "bad" fail.
#[derive(Default)]
struct TestExecutor {
    seen: Mutex<Vec<String>>,
    output: Mutex<Vec<String>>,
}

impl Executor for TestExecutor {
    fn execute(&self, name: &str) -> Result<usize, IngestError> {
        self.seen.lock().expect("lock poisoned").push(name.to_string());
        if name.starts_with("bad") {
            return Err(IngestError::Execution(format!("cannot parse {name}")));
        }
        let count = name.len() % 4 + 1;
        let mut out = self.output.lock().expect("lock poisoned");
        for i in 0..count {
            out.push(format!("{name}:{i}"));
        }
        Ok(count)
    }
}

fn dispatcher(executor: Arc<TestExecutor>, workers: usize) -> Dispatcher {
    Dispatcher::new(executor, FlowControlConfig::with_workers(workers))
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("file_{i}.go")).collect()
}

#[tokio::test]
async fn args_are_dispatched_one_by_one() {
    let executor = Arc::new(TestExecutor::default());
    let stats = dispatcher(Arc::clone(&executor), 1)
        .run(FilenameSource::Args(vec![
            "foo".to_string(),
            "bar".to_string(),
            "buzz".to_string(),
        ]))
        .await
        .unwrap();

    assert_eq!(
        *executor.seen.lock().unwrap(),
        vec!["foo".to_string(), "bar".to_string(), "buzz".to_string()]
    );
    assert_eq!(stats.submitted, 3);
    assert_eq!(stats.succeeded, 3);
    assert_eq!(stats.failed, 0);
}

#[tokio::test]
async fn names_are_read_from_lines_without_args() {
    let executor = Arc::new(TestExecutor::default());
    let reader: &'static [u8] = b"foo\nbar\r\n\nbuzz";
    let source = FilenameSource::from_args_or(Vec::new(), reader);
    let stats = dispatcher(Arc::clone(&executor), 1).run(source).await.unwrap();

    assert_eq!(
        *executor.seen.lock().unwrap(),
        vec!["foo".to_string(), "bar".to_string(), "buzz".to_string()]
    );
    assert_eq!(stats.submitted, 3);
}

#[tokio::test]
async fn invalid_utf8_name_fails_alone() {
    let executor = Arc::new(TestExecutor::default());
    let reader: &'static [u8] = b"first.go\nbad\xff\xfe.go\nlast.go\n";
    let source = FilenameSource::from_args_or(Vec::new(), reader);
    let stats = dispatcher(Arc::clone(&executor), 2).run(source).await.unwrap();

    let mut seen = executor.seen.lock().unwrap().clone();
    seen.sort();
    assert_eq!(seen, vec!["first.go".to_string(), "last.go".to_string()]);
    assert_eq!(stats.submitted, 3);
    assert_eq!(stats.succeeded, 2);
    assert_eq!(stats.failed, 1);
}

#[tokio::test]
async fn args_take_precedence_over_lines() {
    let executor = Arc::new(TestExecutor::default());
    let reader: &'static [u8] = b"ignored\n";
    let source = FilenameSource::from_args_or(vec!["given".to_string()], reader);
    dispatcher(Arc::clone(&executor), 2).run(source).await.unwrap();

    assert_eq!(*executor.seen.lock().unwrap(), vec!["given".to_string()]);
}

#[tokio::test]
async fn failures_are_counted_and_do_not_stop_the_run() {
    let executor = Arc::new(TestExecutor::default());
    let stats = dispatcher(Arc::clone(&executor), 3)
        .run(FilenameSource::Args(vec![
            "good_a".to_string(),
            "bad_b".to_string(),
            "good_c".to_string(),
        ]))
        .await
        .unwrap();

    assert_eq!(
        stats,
        RunStats {
            submitted: 3,
            succeeded: 2,
            failed: 1,
            records: "good_a".len() % 4 + 1 + "good_c".len() % 4 + 1,
        }
    );
    let output = executor.output.lock().unwrap();
    assert!(output.iter().all(|line| !line.starts_with("bad_b")));
}

#[tokio::test]
async fn pool_size_does_not_change_the_output_multiset() {
    let single = Arc::new(TestExecutor::default());
    dispatcher(Arc::clone(&single), 1)
        .run(FilenameSource::Args(names(64)))
        .await
        .unwrap();

    let pooled = Arc::new(TestExecutor::default());
    dispatcher(Arc::clone(&pooled), 9)
        .run(FilenameSource::Args(names(64)))
        .await
        .unwrap();

    let count = |exec: &TestExecutor| {
        let mut counts = BTreeMap::new();
        for line in exec.output.lock().unwrap().iter() {
            *counts.entry(line.clone()).or_insert(0usize) += 1;
        }
        counts
    };
    assert_eq!(count(&single), count(&pooled));
}

/// Yields one good line, then fails.
struct BrokenReader {
    served: bool,
}

impl AsyncRead for BrokenReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::other("unused")))
    }
}

impl AsyncBufRead for BrokenReader {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        let this = self.get_mut();
        if this.served {
            Poll::Ready(Err(io::Error::other("stdin closed unexpectedly")))
        } else {
            Poll::Ready(Ok(&b"first.go\n"[..]))
        }
    }

    fn consume(self: Pin<&mut Self>, _amt: usize) {
        self.get_mut().served = true;
    }
}

#[tokio::test]
async fn enumeration_failure_is_fatal_but_finishes_submitted_work() {
    let executor = Arc::new(TestExecutor::default());
    let source = FilenameSource::Lines(Box::new(BrokenReader { served: false }));
    let err = dispatcher(Arc::clone(&executor), 2)
        .run(source)
        .await
        .unwrap_err();

    assert!(matches!(err, IngestError::Enumeration(_)), "{err}");
    assert_eq!(*executor.seen.lock().unwrap(), vec!["first.go".to_string()]);
}

#[tokio::test]
async fn empty_source_completes() {
    let executor = Arc::new(TestExecutor::default());
    let stats = dispatcher(executor, 4)
        .run(FilenameSource::Args(Vec::new()))
        .await
        .unwrap();
    assert_eq!(stats, RunStats::default());
}
