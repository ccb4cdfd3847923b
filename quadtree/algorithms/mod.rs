// 四叉树算法模块
//
// 每个子模块为 Quadtree 提供一组操作：
// - insert: 插入与批量加载，溢出时路由到子象限
// - divide: 节点分裂
// - query: 矩形范围查询
// - clear: 整树重置

pub mod clear;
pub mod divide;
pub mod insert;
pub mod query;
