//! EduDesk - 多机构教务管理后端服务
//!
//! 基于 Actix Web 构建，负责学生、班级、选课、考勤、测评以及月度学费的全生命周期。
//!
//! # 架构
//! - `cache`: 进程内缓存（Moka）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、授权、限流与定时任务密钥校验
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（含账单任务与通知通道）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
