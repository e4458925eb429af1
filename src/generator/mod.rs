pub mod article;
pub mod debounce;
pub mod prompts;
pub mod sources;
pub mod topic;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;
