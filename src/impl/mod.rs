// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod key_value_storage_datasource;
        pub(crate) mod rest_api_datasource;
        pub(crate) mod secure_token_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod collection_model;
        pub(crate) mod envelope_model;
        pub(crate) mod login_response_model;
        pub(crate) mod recurring_index_model;
        pub(crate) mod session_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod auth_repository_impl;
        pub(crate) mod entity_repository_impl;
        pub(crate) mod snapshot_migrations;
        pub(crate) mod snapshot_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod account;
        pub(crate) mod action;
        pub(crate) mod category;
        pub(crate) mod collection_state;
        pub(crate) mod entity;
        pub(crate) mod goal;
        pub(crate) mod persist_config;
        pub(crate) mod recurring_index;
        pub(crate) mod request;
        pub(crate) mod root_state;
        pub(crate) mod session;
        pub(crate) mod theme;
        pub(crate) mod transaction;
    }
    pub(crate) mod logic {
        pub(crate) mod collection_reducer;
        pub(crate) mod lifecycle;
        pub(crate) mod migration;
        pub(crate) mod persistor;
        pub(crate) mod recurring_index_impl;
        pub(crate) mod root_reducer;
        pub(crate) mod session_reducer;
        pub(crate) mod store;
    }
    pub(crate) mod repositories {
        pub(crate) mod auth_repository;
        pub(crate) mod entity_repository;
        pub(crate) mod snapshot_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod collection_usecase;
        pub(crate) mod session_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod amount_fmt;
    pub(crate) mod selectors;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub use crate::domain::logic::root_reducer::Collection;
    pub use crate::domain::logic::store::Store;

    pub mod entities {
        pub use crate::domain::entities::account::*;
        pub use crate::domain::entities::action::*;
        pub use crate::domain::entities::category::*;
        pub use crate::domain::entities::collection_state::*;
        pub use crate::domain::entities::entity::*;
        pub use crate::domain::entities::goal::*;
        pub use crate::domain::entities::persist_config::*;
        pub use crate::domain::entities::recurring_index::*;
        pub use crate::domain::entities::request::*;
        pub use crate::domain::entities::root_state::*;
        pub use crate::domain::entities::session::*;
        pub use crate::domain::entities::theme::*;
        pub use crate::domain::entities::transaction::*;
    }

    pub mod repositories {
        pub use crate::domain::repositories::auth_repository::*;
        pub use crate::domain::repositories::entity_repository::*;
        pub use crate::domain::repositories::snapshot_repository::*;
    }

    pub mod usecases {
        pub use crate::domain::usecases::collection_usecase::*;
        pub use crate::domain::usecases::session_usecase::*;
    }

    pub mod storage {
        pub use crate::data::datasources::key_value_storage_datasource::*;
        pub use crate::data::datasources::secure_token_datasource::*;
    }

    pub mod selectors {
        pub use crate::presentation::amount_fmt::*;
        pub use crate::presentation::selectors::*;
    }
}
