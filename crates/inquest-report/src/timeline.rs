//! Timeline grouping — flat event list to parent/child tree.

use inquest_core::timeline::TimelineEvent;

/// A top-level event with its attached children.
#[derive(Debug, Clone)]
pub struct TimelineGroup {
  pub parent:   TimelineEvent,
  pub children: Vec<TimelineEvent>,
}

/// The grouped view of an investigation's timeline.
#[derive(Debug, Clone, Default)]
pub struct GroupedTimeline {
  /// Parents in original (chronological) order, children in original
  /// relative order under each.
  pub groups:  Vec<TimelineGroup>,
  /// Children whose `parent_event_id` matched no parent in the input.
  /// The rendered tree never visits these; they are surfaced here so a
  /// caller can flag them rather than lose them silently.
  pub orphans: Vec<TimelineEvent>,
}

/// Partition `events` into parents (no `parent_event_id`) and children, and
/// attach each child to its parent. Input order is preserved on both levels.
pub fn group_events(events: Vec<TimelineEvent>) -> GroupedTimeline {
  let (parents, children): (Vec<_>, Vec<_>) =
    events.into_iter().partition(|e| e.parent_event_id.is_none());

  let mut groups: Vec<TimelineGroup> = parents
    .into_iter()
    .map(|parent| TimelineGroup {
      parent,
      children: Vec::new(),
    })
    .collect();

  let mut orphans = Vec::new();
  for child in children {
    let parent_id = child.parent_event_id;
    match groups
      .iter_mut()
      .find(|g| Some(g.parent.event_id) == parent_id)
    {
      Some(group) => group.children.push(child),
      None => orphans.push(child),
    }
  }

  GroupedTimeline { groups, orphans }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, NaiveTime, Utc};
  use inquest_core::timeline::TimelineEvent;
  use uuid::Uuid;

  use super::*;

  fn event(
    title: &str,
    time: Option<(u32, u32)>,
    parent: Option<Uuid>,
  ) -> TimelineEvent {
    TimelineEvent {
      event_id:          Uuid::new_v4(),
      investigation_id:  Uuid::new_v4(),
      parent_event_id:   parent,
      occurred_on:       NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
      occurred_time:     time
        .map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap()),
      category:          String::new(),
      title:             title.into(),
      is_incident_event: false,
      verified:          false,
      created_at:        Utc::now(),
    }
  }

  #[test]
  fn children_nest_under_matching_parent_in_order() {
    let p1 = event("shift start", Some((6, 0)), None);
    let p2 = event("valve rupture", Some((8, 15)), None);
    let c1 = event("alarm raised", Some((8, 16)), Some(p2.event_id));
    let c2 = event("area evacuated", Some((8, 20)), Some(p2.event_id));

    let grouped =
      group_events(vec![p1.clone(), p2.clone(), c1.clone(), c2.clone()]);

    assert_eq!(grouped.groups.len(), 2);
    assert!(grouped.orphans.is_empty());
    assert_eq!(grouped.groups[0].parent.event_id, p1.event_id);
    assert!(grouped.groups[0].children.is_empty());

    let under_p2: Vec<_> = grouped.groups[1]
      .children
      .iter()
      .map(|c| c.event_id)
      .collect();
    assert_eq!(under_p2, vec![c1.event_id, c2.event_id]);
  }

  #[test]
  fn orphan_child_appears_under_no_parent() {
    let p = event("parent", None, None);
    let orphan = event("dangling", None, Some(Uuid::new_v4()));

    let grouped = group_events(vec![p, orphan.clone()]);

    assert_eq!(grouped.groups.len(), 1);
    assert!(grouped.groups[0].children.is_empty());
    assert_eq!(grouped.orphans.len(), 1);
    assert_eq!(grouped.orphans[0].event_id, orphan.event_id);
  }

  #[test]
  fn empty_input_yields_empty_grouping() {
    let grouped = group_events(Vec::new());
    assert!(grouped.groups.is_empty());
    assert!(grouped.orphans.is_empty());
  }
}
