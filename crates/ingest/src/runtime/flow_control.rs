/// Sizing of the worker pool and its intake queue.
#[derive(Debug, Clone)]
pub struct FlowControlConfig {
    pub workers: usize,
    pub channel_capacity: usize,
}

impl Default for FlowControlConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            channel_capacity: 256,
        }
    }
}

impl FlowControlConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    pub(crate) fn effective_workers(&self) -> usize {
        self.workers.max(1)
    }

    pub(crate) fn effective_capacity(&self) -> usize {
        self.channel_capacity.max(1)
    }
}

/// `2 × cores + 1`.
pub fn default_workers() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cores * 2 + 1
}
