pub mod operators;
pub mod rpn;
pub mod shunting_yard;
