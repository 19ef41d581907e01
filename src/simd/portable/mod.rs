pub mod f32x4;
