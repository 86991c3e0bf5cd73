//! 学生记录数据模型
//!
//! 一页解析结果（`PageParse`）只在聚合时短暂存在；
//! 按身份键聚合后的 `StudentRecord` 存活到本次运行结束。

use phf::phf_map;
use serde::Serialize;

/// 页面中的四个固定段落
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// 我的原文
    Mine,
    /// 语法错误
    Errors,
    /// 单句点评
    Comments,
    /// 更多表达
    More,
}

/// 段落标题 → 段落，也用于按表头定位列
static SECTION_BY_TITLE: phf::Map<&'static str, SectionKind> = phf_map! {
    "我的原文" => SectionKind::Mine,
    "语法错误" => SectionKind::Errors,
    "单句点评" => SectionKind::Comments,
    "更多表达" => SectionKind::More,
};

impl SectionKind {
    /// 固定的字段顺序，与页面上的出现顺序无关
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Mine,
        SectionKind::Errors,
        SectionKind::Comments,
        SectionKind::More,
    ];

    /// 页面与表头中使用的标题
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Mine => "我的原文",
            SectionKind::Errors => "语法错误",
            SectionKind::Comments => "单句点评",
            SectionKind::More => "更多表达",
        }
    }

    /// 从标题精确解析段落
    pub fn from_title(title: &str) -> Option<Self> {
        SECTION_BY_TITLE.get(title).copied()
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// 四个段落的文本
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub mine: String,
    pub errors: String,
    pub comments: String,
    pub more: String,
}

impl Sections {
    pub fn get(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Mine => &self.mine,
            SectionKind::Errors => &self.errors,
            SectionKind::Comments => &self.comments,
            SectionKind::More => &self.more,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::Mine => &mut self.mine,
            SectionKind::Errors => &mut self.errors,
            SectionKind::Comments => &mut self.comments,
            SectionKind::More => &mut self.more,
        }
    }

    /// 四个段落是否全部为空
    pub fn is_empty(&self) -> bool {
        SectionKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

/// 学生身份键：(学校, 班级, 姓名, 学号, 作答时间)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub school: String,
    pub class: String,
    pub name: String,
    pub id: String,
    pub time: String,
}

impl IdentityKey {
    /// 五个字段都非空
    pub fn is_complete(&self) -> bool {
        [&self.school, &self.class, &self.name, &self.id, &self.time]
            .iter()
            .all(|field| !field.is_empty())
    }

    /// 五个字段都为空
    pub fn is_empty(&self) -> bool {
        [&self.school, &self.class, &self.name, &self.id, &self.time]
            .iter()
            .all(|field| field.is_empty())
    }

    /// 宽松键的最低要求：姓名与学号
    pub fn has_name_and_id(&self) -> bool {
        !self.name.is_empty() && !self.id.is_empty()
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} {} #{} @{}]",
            self.school, self.class, self.name, self.id, self.time
        )
    }
}

/// 单页解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParse {
    pub identity: IdentityKey,
    /// `None` 表示本页未出现得分（与 0 分区分）
    pub score: Option<u32>,
    pub sections: Sections,
}

/// 一位学生的聚合记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub school: String,
    pub class: String,
    pub name: String,
    pub id: String,
    pub time: String,
    /// 数字或空串，空串表示尚未观察到得分
    pub score: String,
    pub mine: String,
    pub errors: String,
    pub comments: String,
    pub more: String,
}

impl StudentRecord {
    /// 用身份键创建一条空记录
    pub fn new(identity: &IdentityKey) -> Self {
        Self {
            school: identity.school.clone(),
            class: identity.class.clone(),
            name: identity.name.clone(),
            id: identity.id.clone(),
            time: identity.time.clone(),
            ..Default::default()
        }
    }

    pub fn section(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Mine => &self.mine,
            SectionKind::Errors => &self.errors,
            SectionKind::Comments => &self.comments,
            SectionKind::More => &self.more,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::Mine => &mut self.mine,
            SectionKind::Errors => &mut self.errors,
            SectionKind::Comments => &mut self.comments,
            SectionKind::More => &mut self.more,
        }
    }

    /// 输出排序键：(班级, 姓名, 学号)
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.class, &self.name, &self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_title_round_trip() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_title(kind.title()), Some(kind));
        }
        assert_eq!(SectionKind::from_title("得分"), None);
    }

    #[test]
    fn test_identity_key_checks() {
        let partial = IdentityKey {
            name: "张三".to_string(),
            id: "2023001".to_string(),
            ..Default::default()
        };
        assert!(!partial.is_complete());
        assert!(!partial.is_empty());
        assert!(partial.has_name_and_id());
        assert!(IdentityKey::default().is_empty());
    }
}
