pub mod explore;
pub mod ingest;
pub mod store;
pub mod vk;

// 重新导出主要的服务结构体，以便可以直接从 services 模块导入
pub use explore::ExploreService;
pub use ingest::IngestService;
pub use store::ImageStore;
pub use vk::VkService;
