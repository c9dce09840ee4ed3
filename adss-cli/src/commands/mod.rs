pub mod recover;
pub mod split;
