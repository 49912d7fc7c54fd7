/// 单个推荐相对某个查看者的互动状态
#[derive(Debug, Clone, Default)]
pub struct EngagementStatus {
    /// 查看者是否已收藏该推荐
    pub favorite: bool,
    /// 查看者是否已点赞该推荐
    pub liked: bool,
    pub likes: i32,
    /// 收藏该推荐的总人数
    pub follows: i32,
}
