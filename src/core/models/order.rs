//! Course detective buckets and their user ordering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named course groups the detective can rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectiveBucket {
    /// 博雅課程
    LiberalArts,
    /// 運動與健康 freshman requirements
    SportsFitness,
    /// Other 運動與健康 courses
    SportsOther,
    /// 跨院選修
    CrossDepartment,
    /// 中文思辨與表達
    ChineseCriticalThinking,
    /// Undergraduate courses outside every other bucket, shuffled
    RandomCourses,
    /// Graduate courses, shuffled
    RandomGraduateCourses,
    /// 英文初級
    EnglishBeginner,
    /// 英文中級
    EnglishIntermediate,
    /// 英文中高級
    EnglishAdvancedMid,
    /// 英文高級
    EnglishAdvanced,
}

impl DetectiveBucket {
    /// Every bucket in default priority order
    pub const ALL: [Self; 11] = [
        Self::LiberalArts,
        Self::SportsFitness,
        Self::SportsOther,
        Self::CrossDepartment,
        Self::ChineseCriticalThinking,
        Self::RandomCourses,
        Self::RandomGraduateCourses,
        Self::EnglishBeginner,
        Self::EnglishIntermediate,
        Self::EnglishAdvancedMid,
        Self::EnglishAdvanced,
    ];

    /// Stable identifier used in persisted order lists
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::LiberalArts => "liberal-arts",
            Self::SportsFitness => "sports-fitness",
            Self::SportsOther => "sports-other",
            Self::CrossDepartment => "cross-department",
            Self::ChineseCriticalThinking => "chinese-critical-thinking",
            Self::RandomCourses => "random-courses",
            Self::RandomGraduateCourses => "random-graduate-courses",
            Self::EnglishBeginner => "english-beginner",
            Self::EnglishIntermediate => "english-intermediate",
            Self::EnglishAdvancedMid => "english-advanced-mid",
            Self::EnglishAdvanced => "english-advanced",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LiberalArts => "博雅課程",
            Self::SportsFitness => "運動與健康(大一必修)",
            Self::SportsOther => "運動與健康(其他)",
            Self::CrossDepartment => "跨院選修",
            Self::ChineseCriticalThinking => "中文思辨與表達",
            Self::RandomCourses => "隨機大學部課程",
            Self::RandomGraduateCourses => "隨機研究所課程",
            Self::EnglishBeginner => "英文初級",
            Self::EnglishIntermediate => "英文中級",
            Self::EnglishAdvancedMid => "英文中高級",
            Self::EnglishAdvanced => "英文高級",
        }
    }

    /// Whether the bucket is on in the default order
    #[must_use]
    pub const fn enabled_by_default(self) -> bool {
        matches!(
            self,
            Self::LiberalArts
                | Self::SportsFitness
                | Self::SportsOther
                | Self::CrossDepartment
                | Self::ChineseCriticalThinking
        )
    }

    /// Whether matches are shuffled instead of kept in catalog order
    #[must_use]
    pub const fn is_shuffled(self) -> bool {
        matches!(self, Self::RandomCourses | Self::RandomGraduateCourses)
    }

    /// Look up a bucket by identifier
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id() == id)
    }
}

impl fmt::Display for DetectiveBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A user-orderable, toggleable bucket entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderElement {
    /// Bucket identifier
    pub id: String,
    /// Display label
    #[serde(alias = "content")]
    pub label: String,
    /// Whether the bucket contributes courses
    pub enabled: bool,
}

impl OrderElement {
    /// Element for a bucket with its default enabled flag
    #[must_use]
    pub fn for_bucket(bucket: DetectiveBucket) -> Self {
        Self {
            id: bucket.id().to_string(),
            label: bucket.label().to_string(),
            enabled: bucket.enabled_by_default(),
        }
    }

    /// The bucket this element refers to, if the id is known
    #[must_use]
    pub fn bucket(&self) -> Option<DetectiveBucket> {
        DetectiveBucket::from_id(&self.id)
    }
}

/// Default detective order
#[must_use]
pub fn default_order() -> Vec<OrderElement> {
    DetectiveBucket::ALL
        .into_iter()
        .map(OrderElement::for_bucket)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_enables_first_five() {
        let order = default_order();
        assert_eq!(order.len(), 11);
        assert!(order[..5].iter().all(|e| e.enabled));
        assert!(order[5..].iter().all(|e| !e.enabled));
    }

    #[test]
    fn ids_round_trip() {
        for bucket in DetectiveBucket::ALL {
            assert_eq!(DetectiveBucket::from_id(bucket.id()), Some(bucket));
        }
        assert_eq!(DetectiveBucket::from_id("astrology"), None);
    }

    #[test]
    fn element_accepts_content_alias() {
        let json = r#"{"id":"liberal-arts","content":"博雅課程","enabled":false}"#;
        let element: OrderElement = serde_json::from_str(json).unwrap();
        assert_eq!(element.label, "博雅課程");
        assert_eq!(element.bucket(), Some(DetectiveBucket::LiberalArts));
    }
}
