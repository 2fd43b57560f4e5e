//! 记录打标服务
//!
//! 围绕规则引擎的轻量 REST 外壳：规则 CRUD、载荷打标、统计查询。
//!
//! ## 模块结构
//!
//! - `config`: 分层配置加载
//! - `observability`: tracing 初始化
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use dto::{ApiResponse, CreateRuleRequest, RuleDto, UpdateRuleRequest};
pub use error::ServiceError;
pub use state::AppState;
