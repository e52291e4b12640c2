use super::Repository;

impl Repository {
    pub fn get_in_memory_expiries_count(&self) -> usize {
        self.in_memory_store.expiries.len()
    }
}
