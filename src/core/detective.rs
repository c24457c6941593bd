//! Course detective: bucketed priority ordering
//!
//! The user arranges a list of named buckets ([`OrderElement`]) by priority
//! and enables the ones they care about. Ranking walks the enabled buckets in
//! order and appends every course of the bucket that has not been placed yet,
//! so a course matching several buckets lands under the first one.

use crate::core::models::{default_order, Course, DetectiveBucket, OrderElement, TimeSlot};
use crate::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const SPORTS_PREFIX: &str = "運動與健康：";
const SPORTS_FITNESS: [&str; 2] = ["運動與健康：體適能", "運動與健康：初級游泳"];
const CHINESE_PREFIX: &str = "中文思辨與表達";
const ENGLISH_LEVELS: [&str; 4] = ["英文初級", "英文中級", "英文中高級", "英文高級"];

impl DetectiveBucket {
    /// Whether `course` belongs to this bucket
    #[must_use]
    pub fn matches(self, course: &Course) -> bool {
        let department = course.department.as_str();
        let name = course.name.as_str();
        let graduate = department.contains('碩') || department.contains('博');

        match self {
            Self::LiberalArts => department.starts_with("博雅"),
            Self::SportsFitness => SPORTS_FITNESS.contains(&name),
            Self::SportsOther => name.starts_with(SPORTS_PREFIX) && !SPORTS_FITNESS.contains(&name),
            Self::CrossDepartment => department.starts_with("跨院"),
            Self::ChineseCriticalThinking => name.starts_with(CHINESE_PREFIX),
            Self::RandomCourses => {
                !graduate
                    && !department.starts_with("博雅")
                    && !department.starts_with("跨院")
                    && !name.starts_with(SPORTS_PREFIX)
                    && !name.starts_with(CHINESE_PREFIX)
                    && !ENGLISH_LEVELS.contains(&name)
            }
            Self::RandomGraduateCourses => graduate && !department.starts_with("博雅"),
            Self::EnglishBeginner => name == ENGLISH_LEVELS[0],
            Self::EnglishIntermediate => name == ENGLISH_LEVELS[1],
            Self::EnglishAdvancedMid => name == ENGLISH_LEVELS[2],
            Self::EnglishAdvanced => name == ENGLISH_LEVELS[3],
        }
    }
}

/// Whether the course meets during at least one of the slots
#[must_use]
pub fn meets_in_any_slot(course: &Course, slots: &[TimeSlot]) -> bool {
    slots
        .iter()
        .any(|slot| course.occupies(slot.weekday, slot.period))
}

/// Rank courses by the enabled buckets
///
/// With a seed the shuffled buckets come out the same on every call; without
/// one the generator is seeded from the operating system.
#[must_use]
pub fn rank_courses<'a>(
    courses: &'a [Course],
    order: &[OrderElement],
    slots: &[TimeSlot],
    seed: Option<u64>,
) -> Vec<&'a Course> {
    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    rank_courses_with_rng(courses, order, slots, &mut rng)
}

/// Rank courses by the enabled buckets using the given generator for shuffles
pub fn rank_courses_with_rng<'a, R: Rng + ?Sized>(
    courses: &'a [Course],
    order: &[OrderElement],
    slots: &[TimeSlot],
    rng: &mut R,
) -> Vec<&'a Course> {
    let pool: Vec<&Course> = if slots.is_empty() {
        courses.iter().collect()
    } else {
        courses
            .iter()
            .filter(|course| meets_in_any_slot(course, slots))
            .collect()
    };

    let mut placed: HashSet<&str> = HashSet::new();
    let mut ranked = Vec::new();

    for element in order.iter().filter(|e| e.enabled) {
        let Some(bucket) = element.bucket() else {
            debug!("Skipping unknown detective bucket '{}'", element.id);
            continue;
        };

        let mut matches: Vec<&Course> = pool
            .iter()
            .copied()
            .filter(|course| !placed.contains(course.id.as_str()) && bucket.matches(course))
            .collect();
        if bucket.is_shuffled() {
            matches.shuffle(rng);
        }

        for course in matches {
            if placed.insert(course.id.as_str()) {
                ranked.push(course);
            }
        }
    }

    ranked
}

/// Move the element at `from` to position `to`
///
/// Returns `false` and leaves the order untouched when either index is out
/// of range.
pub fn move_element(order: &mut Vec<OrderElement>, from: usize, to: usize) -> bool {
    if from >= order.len() || to >= order.len() {
        return false;
    }
    let element = order.remove(from);
    order.insert(to, element);
    true
}

/// Flip the enabled flag of the element with `id`; `false` if there is none
pub fn toggle_element(order: &mut [OrderElement], id: &str) -> bool {
    order.iter_mut().find(|e| e.id == id).is_some_and(|element| {
        element.enabled = !element.enabled;
        true
    })
}

/// Rebuild an order list from persisted elements
///
/// Unknown and repeated ids are dropped, labels are refreshed, and buckets
/// missing from the persisted list are appended with their default flag. An
/// empty list yields the default order.
#[must_use]
pub fn restore_order(saved: Vec<OrderElement>) -> Vec<OrderElement> {
    if saved.is_empty() {
        return default_order();
    }

    let mut seen = HashSet::new();
    let mut order: Vec<OrderElement> = saved
        .into_iter()
        .filter_map(|element| {
            let Some(bucket) = element.bucket() else {
                warn!("Ignoring unknown detective bucket '{}'", element.id);
                return None;
            };
            seen.insert(bucket).then(|| OrderElement {
                label: bucket.label().to_string(),
                ..element
            })
        })
        .collect();

    for bucket in DetectiveBucket::ALL {
        if !seen.contains(&bucket) {
            order.push(OrderElement::for_bucket(bucket));
        }
    }
    order
}
