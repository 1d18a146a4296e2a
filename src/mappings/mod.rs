pub mod keysyms;

pub use keysyms::KeysymMapper;
