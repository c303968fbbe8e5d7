mod common;
mod solutions;
