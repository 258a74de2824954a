use std::sync::Arc;

use foyer_core::assets::EmbeddedTree;
use foyer_core::resolver::SpaResolver;

use crate::assets::Assets;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<SpaResolver<EmbeddedTree<Assets>>>,
    pub client: reqwest::Client,
}
