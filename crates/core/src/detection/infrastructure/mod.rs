pub mod model_resolver;
pub mod rustface_detector;
