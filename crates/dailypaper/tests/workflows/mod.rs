use super::*;

mod harvest;
mod publish;
