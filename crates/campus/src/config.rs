use std::f32::consts::FRAC_PI_4;

// Orbit camera
pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 30.0;
/// Keeps the polar angle away from the poles, where the azimuth is undefined.
pub const PHI_EPSILON: f32 = 0.1;
/// Radians of rotation per pixel of pointer drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;
/// World units of zoom per pixel of wheel scroll.
pub const WHEEL_SENSITIVITY: f32 = 0.01;
/// Pixels per scroll "line" for wheels that report in lines.
pub const WHEEL_LINE_PIXELS: f32 = 100.0;
pub const DEFAULT_THETA: f32 = 0.0;
pub const DEFAULT_PHI: f32 = FRAC_PI_4;
pub const DEFAULT_DISTANCE: f32 = 15.0;
/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Hover highlight
pub const HOVER_LIFT: f32 = 0.3;
pub const HIGHLIGHT_COLOR: u32 = 0xffffff;

// Billboard labels
/// Gap between the roof and the label centre.
pub const LABEL_GAP: f32 = 0.8;
pub const LABEL_WIDTH: f32 = 3.0;
pub const LABEL_HEIGHT: f32 = 0.75;
pub const LABEL_TEXTURE_WIDTH: u32 = 512;
pub const LABEL_TEXTURE_HEIGHT: u32 = 128;
pub const LABEL_FONT_SIZE: f32 = 48.0;

// Scene dressing
pub const BACKGROUND_COLOR: u32 = 0x0a1929;
pub const GROUND_COLOR: u32 = 0x1a3a52;
pub const ROAD_COLOR: u32 = 0x666666;
pub const GROUND_SIZE: f32 = 30.0;
pub const ROAD_LENGTH: f32 = 20.0;
pub const ROAD_WIDTH: f32 = 3.0;
pub const FOG_START: f32 = 10.0;
pub const FOG_END: f32 = 30.0;

// Remote occupancy
pub const STATUS_TIMEOUT_SECS: u64 = 5;
pub const STATUS_URL_ENV: &str = "CAMPUS_STATUS_URL";
