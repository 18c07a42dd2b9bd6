// SPDX-License-Identifier: MIT
//
// Watermark page — batch-append the academy banner to uploaded photos.
//
// Pick any number of photos, each gets the advertising strip composited
// beneath it, then save the whole batch at once.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use dioxus::prelude::*;

use gavelmark_core::human_errors::humanize_error;
use gavelmark_core::types::SaveOutcome;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Watermark() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let processed_count = state.read().processed.len();
    let status = state.read().status_message.clone();
    // (id, data URL, export name) per thumbnail, computed outside the markup.
    let thumbs: Vec<(String, String, String)> = state
        .read()
        .processed
        .iter()
        .map(|img| {
            (
                img.id.to_string(),
                format!("data:image/jpeg;base64,{}", STANDARD.encode(&img.jpeg_bytes)),
                img.export_file_name(),
            )
        })
        .collect();

    rsx! {
        div { style: "max-width: 860px;",
            h2 { style: "margin-top: 0;", "일괄 워터마크" }
            p { style: "color: #6b7280; font-size: 14px;",
                "선택한 모든 사진 아래에 학원 광고 배너가 추가됩니다."
            }

            if let Some(msg) = status {
                p { style: "padding: 10px 12px; border-radius: 8px; background: #fff3cd; color: #664d03; font-size: 14px;",
                    "{msg}"
                }
            }

            div { style: "display: flex; gap: 12px; margin-bottom: 20px;",
                button {
                    style: "flex: 1; padding: 16px; border-radius: 10px; border: 2px dashed #2563eb; background: #eff6ff; color: #2563eb; font-size: 16px; font-weight: bold;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| pick_and_process(&mut state, &svc)
                    },
                    "사진 선택"
                }
                button {
                    style: "flex: 1; padding: 16px; border-radius: 10px; border: none; background: #2563eb; color: white; font-size: 16px; font-weight: bold;",
                    disabled: processed_count == 0,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let images = state.read().processed.clone();
                            let svc = svc.clone();
                            // The fallback saver paces batch writes, so keep
                            // the whole save off the UI event loop.
                            spawn(async move {
                                let result = tokio::task::spawn_blocking(move || {
                                    svc.save_processed(&images)
                                })
                                .await;
                                let message = match result {
                                    Ok(outcomes) => batch_summary(&outcomes),
                                    Err(e) => format!("저장 작업이 중단되었습니다: {e}"),
                                };
                                state.write().status_message = Some(message);
                            });
                        }
                    },
                    "전체 저장 ({processed_count})"
                }
                button {
                    style: "padding: 16px 20px; border-radius: 10px; border: 1px solid #d1d5db; background: white; color: #6b7280; font-size: 16px;",
                    disabled: processed_count == 0,
                    onclick: move |_| {
                        let mut st = state.write();
                        st.processed.clear();
                        st.status_message = None;
                    },
                    "비우기"
                }
            }

            // Thumbnails of the current batch, newest last.
            div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 12px;",
                for (id, src, name) in thumbs {
                    div { key: "{id}",
                        style: "border: 1px solid #e5e7eb; border-radius: 8px; overflow: hidden;",
                        img {
                            src: "{src}",
                            style: "width: 100%; display: block;",
                        }
                        p { style: "margin: 0; padding: 6px 8px; font-size: 12px; color: #374151; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                            "{name}"
                        }
                        div { style: "display: flex; gap: 6px; padding: 0 8px 8px;",
                            button {
                                style: "flex: 1; padding: 6px; border-radius: 6px; border: 1px solid #2563eb; background: white; color: #2563eb; font-size: 12px;",
                                onclick: {
                                    let svc = svc.clone();
                                    let id = id.clone();
                                    move |_| save_single(&mut state, &svc, &id)
                                },
                                "저장"
                            }
                            button {
                                style: "padding: 6px 10px; border-radius: 6px; border: 1px solid #d1d5db; background: white; color: #6b7280; font-size: 12px;",
                                onclick: {
                                    let id = id.clone();
                                    move |_| {
                                        state
                                            .write()
                                            .processed
                                            .retain(|img| img.id.to_string() != id);
                                    }
                                },
                                "삭제"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One status line for a finished batch save: saved/total, plus the failure
/// messages when any item did not land.
fn batch_summary(outcomes: &[SaveOutcome]) -> String {
    let saved = outcomes
        .iter()
        .filter(|o| matches!(o, SaveOutcome::Saved))
        .count();
    let failed: Vec<&str> = outcomes
        .iter()
        .filter_map(|o| match o {
            SaveOutcome::Failed(msg) => Some(msg.as_str()),
            _ => None,
        })
        .collect();
    if failed.is_empty() {
        format!("{saved}/{} 장 저장 완료", outcomes.len())
    } else {
        format!(
            "{saved}/{} 장 저장, 실패: {}",
            outcomes.len(),
            failed.join("; ")
        )
    }
}

fn save_single(state: &mut Signal<AppState>, svc: &AppServices, id: &str) {
    let item = {
        let st = state.read();
        st.processed
            .iter()
            .find(|img| img.id.to_string() == id)
            .map(|img| (img.export_file_name(), img.jpeg_bytes.clone()))
    };
    let Some((name, bytes)) = item else { return };
    let message = match svc.save_one(&name, &bytes) {
        SaveOutcome::Saved => format!("{name} 저장 완료"),
        SaveOutcome::Cancelled => "저장을 취소했습니다.".into(),
        SaveOutcome::Failed(msg) => msg,
    };
    state.write().status_message = Some(message);
}

fn pick_and_process(state: &mut Signal<AppState>, svc: &AppServices) {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp"])
            .pick_files()
        else {
            return;
        };

        state.write().status_message = None;

        // Each file is composited in its own task; results append to the
        // shared list as they complete, so a slow or broken file never
        // blocks the rest of the batch.
        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "photo".into());
            let svc = svc.clone();
            let mut state = *state;
            spawn(async move {
                let result =
                    tokio::task::spawn_blocking(move || svc.watermark_file(&path)).await;
                match result {
                    Ok(Ok(img)) => state.write().processed.push(img),
                    Ok(Err(e)) => {
                        let human = humanize_error(&e);
                        append_failure(&mut state, &name, &human.message);
                    }
                    Err(e) => append_failure(&mut state, &name, &e.to_string()),
                }
            });
        }
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        let _ = svc;
        state.write().status_message = Some("이 플랫폼에서는 파일 선택을 지원하지 않습니다.".into());
    }
}

#[cfg(not(any(target_os = "ios", target_os = "android")))]
fn append_failure(state: &mut Signal<AppState>, name: &str, message: &str) {
    let mut st = state.write();
    let line = format!("{name}: {message}");
    st.status_message = Some(match st.status_message.take() {
        Some(prev) => format!("{prev}; {line}"),
        None => format!("처리하지 못한 파일: {line}"),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_summary_counts_saved() {
        let outcomes = vec![SaveOutcome::Saved, SaveOutcome::Saved, SaveOutcome::Cancelled];
        assert_eq!(batch_summary(&outcomes), "2/3 장 저장 완료");
    }

    #[test]
    fn batch_summary_lists_failures() {
        let outcomes = vec![
            SaveOutcome::Saved,
            SaveOutcome::Failed("disk full".into()),
        ];
        let summary = batch_summary(&outcomes);
        assert!(summary.starts_with("1/2"));
        assert!(summary.contains("disk full"));
    }
}
