//! Recipe service access.
//!
//! - [`backend`]: the [`RecipeApi`] trait every caller depends on
//! - [`http`]: [`HttpRecipeApi`], the reqwest implementation

pub mod backend;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use backend::RecipeApi;
pub use http::HttpRecipeApi;
