pub mod clock;
pub mod html;
