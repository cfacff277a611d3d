#[allow(non_snake_case)]
pub mod Mechanism;
#[allow(non_snake_case)]
pub mod Pathways;
#[allow(non_snake_case)]
pub mod Utils;
pub mod errors;
pub mod settings;
