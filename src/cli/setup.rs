//! Runtime setup: thread pool configuration and worker-count resolution.

/// Configure the rayon global thread pool once at startup.
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        // Already configured - this is fine, just ignore
        log::debug!("thread pool already configured: {}", e);
    }
}

/// Resolve the number of workers: 0 means the host's available parallelism,
/// never less than one.
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or_else(|_| num_cpus::get().max(1))
    } else {
        jobs
    }
}
