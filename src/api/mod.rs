pub mod leave_request;
pub mod me;

use crate::engine::LifecycleEngine;
use crate::identity::IdentityResolver;
use crate::store::mysql::MySqlStore;

pub type Engine = LifecycleEngine<MySqlStore>;
pub type Resolver = IdentityResolver<MySqlStore>;
