mod cancellation;
mod completeness;
mod concurrency;
mod fallback;
