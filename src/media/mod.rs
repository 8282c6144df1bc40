//! メディア取得モジュール
//!
//! カメラセッションの開閉と静止画取得、ファイル選択の受け付けを担当する。
//! カメラ本体は `CameraDevice` として外から渡す。

mod camera;
mod capture;
mod command_camera;
mod file;

pub use camera::{open_camera, CameraDevice, CameraSession, FacingMode, RawFrame, VideoStream};
pub use capture::{capture_frame, encode_jpeg, CapturedImage};
pub use command_camera::CommandCamera;
pub use file::{accept_file, SelectedFile};
