use crate::models::viewport_types::SizeClass;
use crate::services::viewport::ViewportObserver;
use std::sync::Arc;
use tauri::State;

#[tauri::command]
pub fn report_viewport_width(
    observer: State<'_, Arc<ViewportObserver>>,
    width: u32,
) -> SizeClass {
    observer.update(width)
}

#[tauri::command]
pub fn get_size_class(observer: State<'_, Arc<ViewportObserver>>) -> SizeClass {
    observer.size_class()
}
