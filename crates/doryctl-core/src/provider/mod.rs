//! Sources of project definition documents.

pub mod http;

use crate::document::Document;
use crate::error::RemoteError;

pub use http::HttpDefinitionProvider;

/// Supplies the raw project definition for a project name.
pub trait DefinitionProvider {
    fn fetch_project_definition(&self, project_name: &str) -> Result<Document, RemoteError>;
}

impl<P: DefinitionProvider + ?Sized> DefinitionProvider for &P {
    fn fetch_project_definition(&self, project_name: &str) -> Result<Document, RemoteError> {
        (**self).fetch_project_definition(project_name)
    }
}

impl<P: DefinitionProvider + ?Sized> DefinitionProvider for Box<P> {
    fn fetch_project_definition(&self, project_name: &str) -> Result<Document, RemoteError> {
        (**self).fetch_project_definition(project_name)
    }
}
