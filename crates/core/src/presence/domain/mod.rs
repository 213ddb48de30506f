pub mod debouncer;
pub mod output_sink;
pub mod presence_source;
