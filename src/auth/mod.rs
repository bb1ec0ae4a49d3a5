pub mod jwt;
pub mod local;
pub mod middleware;
pub mod password;
pub mod provider;
pub mod rate_limit;
pub mod supabase;

pub use local::LocalIdentity;
pub use middleware::{require_auth, AuthUser};
pub use provider::{AuthError, IdentityProvider, NewUser, ProviderError, Session};
pub use supabase::SupabaseIdentity;
