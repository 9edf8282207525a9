use sea_orm::DatabaseConnection;

use crate::associations::AssociationGraph;

/// Schema/session context built once at startup and handed to the service layer.
#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub associations: AssociationGraph,
}

impl AppState {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self {
            orm,
            associations: AssociationGraph::default(),
        }
    }
}
