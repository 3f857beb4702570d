use crate::app::dto::{
    ClassRef, HierarchyNodeDto, StyledTextDto, TreeItemDto, TreeNodeDto, UmlTableResponse,
};
use crate::app::engine::ModelEngine;
use anyhow::Result;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn class_label(class: &ClassRef) -> String {
    let mut label = format!("[{}] {}", class.symbol, class.name);
    if !class.processed {
        label.push_str(" (unprocessed)");
    }
    label
}

pub fn display_classes(engine: &ModelEngine, json: bool) -> Result<()> {
    let result = engine.classes();
    if json {
        return print_json(&result);
    }

    println!("{} classes:", result.total);
    println!("{}", "=".repeat(80));
    for class in &result.items {
        println!("{}  {}", class_label(class), class.full_name);
    }
    Ok(())
}

pub fn display_hierarchy(engine: &ModelEngine, root: Option<&str>, json: bool) -> Result<()> {
    let result = engine.hierarchy(root)?;
    if json {
        return print_json(&result);
    }

    for node in &result.roots {
        print_hierarchy_node(node, 0);
    }
    Ok(())
}

fn print_hierarchy_node(node: &HierarchyNodeDto, depth: usize) {
    let count = if node.subtree_classes_count > 0 {
        format!(" ({})", node.subtree_classes_count)
    } else {
        String::new()
    };
    println!("{}{}{}", "  ".repeat(depth), class_label(&node.class), count);
    for child in &node.children {
        print_hierarchy_node(child, depth + 1);
    }
}

pub fn display_members(engine: &ModelEngine, class: &str, json: bool) -> Result<()> {
    let result = engine.members(class)?;
    if json {
        return print_json(&result);
    }

    print_tree_node(&result, 0);
    Ok(())
}

fn print_tree_node(node: &TreeNodeDto, depth: usize) {
    let label = match &node.item {
        TreeItemDto::Class { class } => class_label(class),
        _ => node.label(),
    };
    println!("{}{}", "  ".repeat(depth), label);
    for child in &node.children {
        print_tree_node(child, depth + 1);
    }
}

fn joined(items: &[StyledTextDto], separator: &str) -> String {
    items
        .iter()
        .map(|i| i.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn display_uml(engine: &ModelEngine, class: &str, json: bool) -> Result<()> {
    let result = engine.uml(class)?;
    if json {
        return print_json(&result);
    }

    print_uml(&result);
    Ok(())
}

fn print_uml(table: &UmlTableResponse) {
    println!("{}", "=".repeat(60));
    for parent in &table.parents {
        println!("{}", parent.text);
    }
    if !table.parents.is_empty() {
        println!();
    }
    for stereotype in &table.stereotypes {
        println!("{}", stereotype.text);
    }
    if let Some(namespace) = &table.namespace {
        println!("{namespace}");
    }
    println!("{}", table.name.text);

    for section in &table.sections {
        println!("{}", "-".repeat(60));
        println!("{}", section.title.text);
        for row in &section.rows {
            if !row.prelude.is_empty() {
                println!("   {}", joined(&row.prelude, " "));
            }
            println!("{}", row.text);
        }
    }
    println!("{}", "=".repeat(60));
}

pub fn display_summary(engine: &ModelEngine, class: &str, json: bool) -> Result<()> {
    let result = engine.summary(class)?;
    if json {
        return print_json(&result);
    }

    let [members, parents, children, used_by, uses] = &result.cells;
    println!("{}", result.full_name_uml);
    println!("Members:   {:>4}", members);
    println!("Relations: {:>4} {:>4} {:>4} {:>4}", "\u{2191}", "\u{2193}", "\u{2190}", "\u{2192}");
    println!("           {:>4} {:>4} {:>4} {:>4}", parents, children, used_by, uses);
    Ok(())
}

/// Loading already validated the snapshot; report what was built.
pub fn check_snapshot(engine: &ModelEngine, json: bool) -> Result<()> {
    let health = engine.health();
    if json {
        return print_json(&health);
    }

    println!("Snapshot OK: {}", health.snapshot_path);
    println!("  Classes: {}", health.class_count);
    println!("  Processed: {}", health.processed_count);
    println!("  Placeholders: {}", health.placeholder_count);
    println!("  Ordering: {}", health.ordering);
    Ok(())
}
