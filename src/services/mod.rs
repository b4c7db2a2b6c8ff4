pub mod id_allocator;
pub mod store;
mod todo_service;

pub use id_allocator::IdAllocator;
pub use store::JsonTable;
pub use todo_service::TodoService;
