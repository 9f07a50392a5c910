//! LMS 数据与自定义课程到统一课程视图的映射

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::term::resolve_term;
use crate::config::TermOverride;
use crate::models::courses::entities::CustomCourse;
use crate::models::lms::{LmsCourseBundle, LmsItemKind, ResolvedItem};
use crate::models::materials::entities::{CustomMaterial, MaterialType};
use crate::models::subjects::{
    Assignment, AssignmentStatus, Resource, ResourceKind, Subject, SubjectSource, Topic,
};
use crate::models::topics::entities::CustomTopic;

/// LMS 课程 -> Subject
///
/// 模块按原顺序映射为主题；`topic_id` 等于模块 ID 的自定义资料追加到该主题末尾，
/// `course_id` 等于 LMS 课程 ID 的自定义主题追加在所有模块之后。
pub fn subject_from_lms(
    bundle: LmsCourseBundle,
    term_override: Option<TermOverride>,
    custom_topics: Vec<CustomTopic>,
    custom_materials: Vec<CustomMaterial>,
    now: DateTime<Utc>,
) -> Subject {
    let LmsCourseBundle {
        course,
        modules,
        syllabus_url,
        ..
    } = bundle;

    let term_name = course.term.as_ref().and_then(|t| t.name.as_deref());
    let (year, semester) = resolve_term(term_name, term_override);

    let mut materials_by_topic = group_materials(custom_materials);

    let mut topics: Vec<Topic> = modules
        .into_iter()
        .map(|resolved| {
            let module_id = resolved.module.id.to_string();
            let mut resources = Vec::new();
            let mut assignments = Vec::new();

            for item in &resolved.items {
                match item.item.kind {
                    LmsItemKind::Assignment => assignments.push(assignment_from_item(item, now)),
                    _ => resources.extend(resources_from_item(item)),
                }
            }

            if let Some(extra) = materials_by_topic.remove(&module_id) {
                resources.extend(extra.iter().map(material_to_resource));
            }

            Topic {
                id: module_id,
                title: resolved.module.name,
                schedule: None,
                category: None,
                resources,
                assignments,
            }
        })
        .collect();

    topics.extend(custom_topics_to_topics(custom_topics, &mut materials_by_topic));

    Subject {
        id: course.id.to_string(),
        source: SubjectSource::Lms,
        course_code: if course.course_code.trim().is_empty() {
            course.name.clone()
        } else {
            course.course_code
        },
        title: course.name,
        year,
        semester,
        image_url: course.image_download_url,
        syllabus_url,
        topics,
    }
}

/// 自定义课程 -> Subject
pub fn subject_from_custom(
    course: CustomCourse,
    topics: Vec<CustomTopic>,
    materials: Vec<CustomMaterial>,
) -> Subject {
    let mut materials_by_topic = group_materials(materials);
    let topics = custom_topics_to_topics(topics, &mut materials_by_topic);

    Subject {
        id: course.id,
        source: SubjectSource::Custom,
        course_code: course.course_code,
        title: course.title,
        year: course.year,
        semester: course.semester,
        image_url: course.image_url,
        syllabus_url: course.syllabus_url,
        topics,
    }
}

/// 自定义资料 -> Resource
pub fn material_to_resource(material: &CustomMaterial) -> Resource {
    let item = &material.item;
    let kind = match item.item_type {
        MaterialType::Link => ResourceKind::Link,
        MaterialType::Page => ResourceKind::Handout,
        MaterialType::File => match ResourceKind::from_file_name(&item.title) {
            ResourceKind::Other => item
                .url
                .as_deref()
                .map(|url| ResourceKind::from_file_name(url_path(url)))
                .unwrap_or(ResourceKind::Other),
            kind => kind,
        },
    };

    Resource {
        id: material.id.clone(),
        kind,
        title: item.title.clone(),
        url: match item.item_type {
            MaterialType::Page => None,
            _ => item.url.clone(),
        },
        html_content: match item.item_type {
            MaterialType::Page => item.html_content.clone(),
            _ => None,
        },
    }
}

/// 合并课程列表：自定义课程在前，LMS 课程按配置顺序在后，不按课程代码去重
pub fn merge_subjects(custom: Vec<Subject>, lms: Vec<Subject>) -> Vec<Subject> {
    let mut merged = custom;
    merged.extend(lms);
    merged
}

fn group_materials(materials: Vec<CustomMaterial>) -> HashMap<String, Vec<CustomMaterial>> {
    let mut grouped: HashMap<String, Vec<CustomMaterial>> = HashMap::new();
    for material in materials {
        grouped
            .entry(material.topic_id.clone())
            .or_default()
            .push(material);
    }
    grouped
}

fn custom_topics_to_topics(
    mut topics: Vec<CustomTopic>,
    materials_by_topic: &mut HashMap<String, Vec<CustomMaterial>>,
) -> Vec<Topic> {
    topics.sort_by_key(|t| t.position);
    topics
        .into_iter()
        .map(|topic| {
            let resources = materials_by_topic
                .remove(&topic.id)
                .map(|materials| materials.iter().map(material_to_resource).collect())
                .unwrap_or_default();
            Topic {
                id: topic.id,
                title: topic.title,
                schedule: topic.schedule,
                category: topic.category,
                resources,
                assignments: Vec::new(),
            }
        })
        .collect()
}

fn resources_from_item(resolved: &ResolvedItem) -> Vec<Resource> {
    let item = &resolved.item;
    let id = item.id.to_string();

    match item.kind {
        LmsItemKind::File => vec![Resource {
            id,
            kind: ResourceKind::from_file_name(&item.title),
            title: item.title.clone(),
            url: resolved.file_url().map(str::to_string),
            html_content: None,
        }],
        LmsItemKind::Page if !resolved.embedded_files.is_empty() => {
            let mut issued: HashSet<String> = HashSet::new();
            resolved
                .embedded_files
                .iter()
                .map(|file| {
                    // 重名时追加序号，直到 ID 未被占用
                    let base = format!("{id}-{}", file.name);
                    let mut resource_id = base.clone();
                    let mut n = 2;
                    while issued.contains(&resource_id) {
                        resource_id = format!("{base}-{n}");
                        n += 1;
                    }
                    issued.insert(resource_id.clone());
                    Resource {
                        id: resource_id,
                        kind: ResourceKind::from_file_name(&file.name),
                        title: file.name.clone(),
                        url: Some(file.url.clone()),
                        html_content: None,
                    }
                })
                .collect()
        }
        LmsItemKind::Page
        | LmsItemKind::Quiz
        | LmsItemKind::Discussion
        | LmsItemKind::ExternalTool => vec![link(id, item.title.clone(), item.html_url.clone())],
        LmsItemKind::ExternalUrl => vec![link(
            id,
            item.title.clone(),
            item.external_url.clone().or_else(|| item.html_url.clone()),
        )],
        LmsItemKind::SubHeader => Vec::new(),
        LmsItemKind::Assignment | LmsItemKind::Other => {
            debug!("Skipping module item {} ({:?})", item.id, item.kind);
            Vec::new()
        }
    }
}

fn link(id: String, title: String, url: Option<String>) -> Resource {
    Resource {
        id,
        kind: ResourceKind::Link,
        title,
        url,
        html_content: None,
    }
}

fn assignment_from_item(resolved: &ResolvedItem, now: DateTime<Utc>) -> Assignment {
    let item = &resolved.item;
    let due_date = item
        .content_details
        .as_ref()
        .and_then(|d| d.due_at.clone());

    Assignment {
        id: item.id.to_string(),
        title: item.title.clone(),
        status: assignment_status(due_date.as_deref(), now),
        due_date,
        description: String::new(),
        file_url: item.html_url.clone(),
    }
}

/// 截止时间早于当前时间为 Overdue；缺失或无法解析视为 Upcoming
pub fn assignment_status(due_date: Option<&str>, now: DateTime<Utc>) -> AssignmentStatus {
    match due_date.and_then(|d| DateTime::parse_from_rfc3339(d).ok()) {
        Some(due) if due.with_timezone(&Utc) < now => AssignmentStatus::Overdue,
        _ => AssignmentStatus::Upcoming,
    }
}

fn url_path(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}
