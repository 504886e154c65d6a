//! sea-orm entities for the portal service tables.
//!
//! Table and column names follow the legacy schema (`usuarios`, `clientes`,
//! `clientes.usuario_portal_id`) — they are shared with the production
//! database and must not be renamed here.

pub mod clientes;
pub mod usuarios;
