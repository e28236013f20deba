pub mod cache;
pub mod cache_maintenance;
pub mod resolver;
pub mod roots;
pub mod server;
pub mod transport;

pub use cache::{CacheKey, RecordCache};
pub use cache_maintenance::CacheMaintenance;
pub use resolver::RecursiveResolver;
pub use roots::ROOT_SERVERS;
pub use server::run_udp_server;
pub use transport::{NetExchange, Protocol, UpstreamExchange};
