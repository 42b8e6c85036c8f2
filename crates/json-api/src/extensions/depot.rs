//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use trolley_app::uuids::OwnerUuid;

const OWNER_UUID_KEY: &str = "owner_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the authenticated owner for downstream handlers.
    fn insert_owner_uuid(&mut self, owner: OwnerUuid);

    /// Retrieve the authenticated owner set by the auth middleware.
    fn owner_uuid_or_401(&self) -> Result<OwnerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_owner_uuid(&mut self, owner: OwnerUuid) {
        self.insert(OWNER_UUID_KEY, owner);
    }

    fn owner_uuid_or_401(&self) -> Result<OwnerUuid, StatusError> {
        self.get::<OwnerUuid>(OWNER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Not authenticated"))
    }
}
