pub mod errors;
pub mod pagination;
pub mod store_service;

#[cfg(test)]
mod test_support;
