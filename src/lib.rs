pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod interpret;
pub mod model;
pub mod view;

pub use catalog::{RecipeCatalog, ViewState};
pub use config::{CatalogConfig, RetryConfig};
pub use error::CatalogError;
pub use fetcher::{HttpSource, RecipeFetcher, RecipeSource};
pub use interpret::{FetchOutcome, INVALID_DATA_ADVISORY};
pub use model::{Recipe, RecipeCollection};
pub use view::{render, ViewNode};

use log::debug;

/// Fetch recipes from `endpoint` with the default retry policy
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_catalog::CatalogError> {
/// let outcome = recipe_catalog::fetch_recipes("http://localhost:8000/recepies").await?;
/// for name in outcome.recipes.names() {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_recipes(endpoint: &str) -> Result<FetchOutcome, CatalogError> {
    let config = CatalogConfig {
        endpoint: endpoint.to_string(),
        ..Default::default()
    };
    RecipeFetcher::from_config(&config)?.fetch_recipes().await
}

/// Mount a catalog for `config`, wait for the first load and render it
pub async fn load_and_render(config: &CatalogConfig) -> Result<ViewNode, CatalogError> {
    let catalog = RecipeCatalog::new(RecipeFetcher::from_config(config)?);
    let _load = catalog.mount();
    let state = catalog.settled().await;
    debug!("Catalog settled: {:?}", state);
    Ok(catalog.render())
}
