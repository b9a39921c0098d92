pub mod entity;
pub mod html;
