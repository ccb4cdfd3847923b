use super::super::quadtree::Quadtree;

impl Quadtree {
    /// 清空整棵子树
    ///
    /// 丢弃本节点的点和全部子节点，之后的行为与同范围、同容量的新节点一致。
    pub fn clear(&mut self) {
        self.points.clear();
        self.children = None;
    }
}
