mod pagination;

pub use pagination::{LoadMode, PageTicket, PagedList};
