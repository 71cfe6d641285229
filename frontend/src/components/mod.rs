pub mod dropzone;
pub mod screenshot_uploader;
