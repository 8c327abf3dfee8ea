//! Notify Server - 订单状态通知与员工级联服务
//!
//! # 架构概述
//!
//! - **通知核心** (`notify`): 订单状态变更 → 分类 → 时效过滤 → 收件人解析 → 推送
//! - **员工级联** (`staff`): 创建/更新/停用/删除员工，同步身份存储、员工文档与桌台分配
//! - **协作者接口** (`gateway`): 身份存储、文档存储、推送网关 trait
//! - **数据库** (`db`): SQLite 实现的文档存储与身份存储
//! - **HTTP API** (`api`): axum 路由
//!
//! # 模块结构
//!
//! ```text
//! notify-server/src/
//! ├── config.rs      # 环境变量配置
//! ├── state.rs       # AppState (注入的协作者句柄)
//! ├── auth.rs        # Bearer JWT 调用者认证
//! ├── error.rs       # ServiceError
//! ├── gateway/       # 协作者 trait + FCM 推送网关
//! ├── db/            # SQLite 存储
//! ├── notify/        # 通知核心
//! ├── staff/         # 员工级联
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod staff;
pub mod state;
pub mod utils;

/// Boxed error used at collaborator boundaries
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// Re-export 公共类型
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use notify::{OrderStatusTrigger, SuppressReason, TriggerOutcome};
pub use staff::StaffCascadeManager;
pub use state::AppState;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
