pub mod category;

pub use category::CategoryRepository;
