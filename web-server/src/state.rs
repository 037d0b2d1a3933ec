// web-server/src/state.rs
use std::io;
use std::sync::Arc;

use actix::{Actor, Addr};
use actix_web::web;
use common::{Config, SessionConfig, StaticFilesConfig};

use crate::contact::ContactLog;
use crate::credentials::CredentialVerifier;
use crate::session_registry::SessionRegistryActor;
use crate::templates::Pages;
use crate::uploads::UploadStore;

/// Shared handles registered as app data on every worker
#[derive(Clone)]
pub struct AppState {
    pub registry: web::Data<Addr<SessionRegistryActor>>,
    pub verifier: web::Data<dyn CredentialVerifier>,
    pub session_config: web::Data<SessionConfig>,
    pub pages: web::Data<Pages>,
    pub uploads: web::Data<UploadStore>,
    pub contact: web::Data<ContactLog>,
    pub static_files: StaticFilesConfig,
}

impl AppState {
    /// Prepare storage locations and start the session registry.
    /// Must run inside an actix system.
    pub fn new(config: &Config, verifier: Arc<dyn CredentialVerifier>) -> io::Result<Self> {
        let uploads = UploadStore::new(&config.uploads.dir);
        uploads.ensure_dir()?;

        let contact = ContactLog::new(&config.contact.data_file);
        contact.ensure_parent_dir()?;

        let pages = Pages::new().map_err(io::Error::other)?;

        let registry = SessionRegistryActor::new()
            .with_ttl(config.session.ttl_seconds)
            .with_cleanup_interval(config.session.cleanup_interval_seconds)
            .start();

        tracing::info!(
            "Uploads go to {}, contact records to {}",
            uploads.dir().display(),
            contact.path().display()
        );

        Ok(Self {
            registry: web::Data::new(registry),
            verifier: web::Data::from(verifier),
            session_config: web::Data::new(config.session.clone()),
            pages: web::Data::new(pages),
            uploads: web::Data::new(uploads),
            contact: web::Data::new(contact),
            static_files: config.static_files.clone(),
        })
    }
}
