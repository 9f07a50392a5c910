//! Course Portal - 大学课程门户后端服务
//!
//! 基于 Actix Web 构建，把 LMS 课程与管理端维护的自定义课程统一成一个课程视图。
//!
//! # 架构
//! - `adapters`: LMS 数据与自定义课程到统一视图的映射
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `feeds`: 公开表格与日历源
//! - `lms`: LMS 接口客户端与课程聚合
//! - `middlewares`: 会话与角色校验中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod adapters;
pub mod config;
pub mod entity;
pub mod errors;
pub mod feeds;
pub mod lms;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
