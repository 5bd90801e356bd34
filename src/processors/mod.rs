//! Image-to-tensor preprocessing and score postprocessing.

pub mod preprocess;
pub mod topk;

pub use preprocess::Preprocessor;
pub use topk::{Top1, top1, topk};
