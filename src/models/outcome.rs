//! 带原因的解析结果
//!
//! 对外契约会把这些结果折叠成默认值（空串、"未观察到"），
//! 内部保留原因，方便日志与测试区分"为什么是空"。

use crate::models::record::IdentityKey;

/// 单个字段的查找结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// 找到并成功解析
    Found(T),
    /// 搜索范围内没有匹配
    Missing,
    /// 匹配到了但内容无法解析（保留原文）
    Invalid(String),
}

impl<T> Lookup<T> {
    /// 折叠为 Option，丢弃原因
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing | Lookup::Invalid(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// 页面归属的判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution {
    /// 五个身份字段齐全
    Strict(IdentityKey),
    /// 字段不全，但姓名与学号都在
    Relaxed(IdentityKey),
    /// 无法确定归属，页面被丢弃
    Unattributable,
}

impl KeyResolution {
    /// 按"完整键优先，其次姓名+学号"的规则判定
    pub fn resolve(identity: IdentityKey) -> Self {
        if identity.is_complete() {
            KeyResolution::Strict(identity)
        } else if identity.has_name_and_id() {
            KeyResolution::Relaxed(identity)
        } else {
            KeyResolution::Unattributable
        }
    }

    pub fn key(&self) -> Option<&IdentityKey> {
        match self {
            KeyResolution::Strict(key) | KeyResolution::Relaxed(key) => Some(key),
            KeyResolution::Unattributable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(school: &str, name: &str, id: &str) -> IdentityKey {
        IdentityKey {
            school: school.to_string(),
            class: if school.is_empty() { String::new() } else { "高一(1)班".to_string() },
            name: name.to_string(),
            id: id.to_string(),
            time: if school.is_empty() { String::new() } else { "2024-05-01 10:00".to_string() },
        }
    }

    #[test]
    fn test_resolve_strict() {
        let resolution = KeyResolution::resolve(identity("一中", "张三", "001"));
        assert!(matches!(resolution, KeyResolution::Strict(_)));
    }

    #[test]
    fn test_resolve_relaxed_keeps_partial_fields() {
        let resolution = KeyResolution::resolve(identity("", "张三", "001"));
        match resolution {
            KeyResolution::Relaxed(key) => {
                assert_eq!(key.name, "张三");
                assert!(key.time.is_empty());
            }
            other => panic!("应为宽松键: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_unattributable() {
        assert_eq!(
            KeyResolution::resolve(identity("", "张三", "")),
            KeyResolution::Unattributable
        );
        assert_eq!(
            KeyResolution::resolve(IdentityKey::default()),
            KeyResolution::Unattributable
        );
    }

    #[test]
    fn test_lookup_found() {
        assert_eq!(Lookup::Found(85).found(), Some(85));
        assert_eq!(Lookup::<u32>::Missing.found(), None);
        assert_eq!(Lookup::<u32>::Invalid("99999999999".to_string()).found(), None);
    }
}
