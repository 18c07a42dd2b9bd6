// SPDX-License-Identifier: MIT
//
// Cover page — the auction listing form plus the rendered cover preview.
//
// Flow: pick a property photo → (optionally) let the hosted model fill the
// form from an auction summary image → generate the cover → save it.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use dioxus::prelude::*;

use gavelmark_core::human_errors::humanize_error;
use gavelmark_core::types::SaveOutcome;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Cover() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut extracting = use_signal(|| false);

    let preview_src = state
        .read()
        .cover_png
        .as_ref()
        .map(|png| format!("data:image/png;base64,{}", STANDARD.encode(png)));
    let status = state.read().status_message.clone();
    let photo_name = state.read().photo_name.clone();

    rsx! {
        div { style: "display: flex; gap: 24px; flex-wrap: wrap;",

            // -- Listing form -------------------------------------------------
            div { style: "flex: 1; min-width: 320px; max-width: 480px;",
                h2 { style: "margin-top: 0;", "경매 정보" }

                if let Some(msg) = status {
                    p { style: "padding: 10px 12px; border-radius: 8px; background: #fff3cd; color: #664d03; font-size: 14px;",
                        "{msg}"
                    }
                }

                button {
                    style: "width: 100%; padding: 14px; border-radius: 10px; border: 2px dashed #2563eb; background: #eff6ff; color: #2563eb; font-size: 16px; font-weight: bold; margin-bottom: 12px;",
                    onclick: move |_| pick_photo(&mut state),
                    if let Some(name) = photo_name {
                        "사진: {name}"
                    } else {
                        "매물 사진 선택"
                    }
                }

                button {
                    style: "width: 100%; padding: 12px; border-radius: 10px; border: 1px solid #6b7280; background: white; color: #374151; font-size: 15px; margin-bottom: 16px;",
                    disabled: state.read().photo_bytes.is_none() || *extracting.read(),
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let Some(bytes) = state.read().photo_bytes.clone() else {
                                return;
                            };
                            extracting.set(true);
                            let svc = svc.clone();
                            spawn(async move {
                                match svc.extract_record(bytes).await {
                                    Ok(record) => {
                                        let mut st = state.write();
                                        st.record = record;
                                        st.status_message =
                                            Some("이미지에서 정보를 불러왔습니다.".into());
                                    }
                                    Err(e) => {
                                        let human = humanize_error(&e);
                                        state.write().status_message = Some(format!(
                                            "{} {}",
                                            human.message, human.suggestion
                                        ));
                                    }
                                }
                                extracting.set(false);
                            });
                        }
                    },
                    if *extracting.read() { "분석 중..." } else { "AI로 정보 불러오기" }
                }

                Field {
                    label: "아파트명",
                    value: state.read().record.apartment_name.clone(),
                    on_change: move |v: String| state.write().record.apartment_name = v,
                }
                Field {
                    label: "주소",
                    value: state.read().record.address.clone(),
                    on_change: move |v: String| state.write().record.address = v,
                }
                Field {
                    label: "사건번호",
                    value: state.read().record.case_number.clone(),
                    on_change: move |v: String| state.write().record.case_number = v,
                }
                Field {
                    label: "매각기일",
                    value: state.read().record.sale_date.clone(),
                    on_change: move |v: String| state.write().record.sale_date = v,
                }
                Field {
                    label: "감정가",
                    value: state.read().record.appraisal_value.clone(),
                    on_change: move |v: String| state.write().record.appraisal_value = v,
                }
                Field {
                    label: "최저가",
                    value: state.read().record.minimum_price.clone(),
                    on_change: move |v: String| state.write().record.minimum_price = v,
                }
                Field {
                    label: "최저가 비율",
                    value: state.read().record.minimum_percentage.clone(),
                    on_change: move |v: String| state.write().record.minimum_percentage = v,
                }
                Field {
                    label: "대지면적",
                    value: state.read().record.land_area.clone(),
                    on_change: move |v: String| state.write().record.land_area = v,
                }
                Field {
                    label: "건물면적",
                    value: state.read().record.building_area.clone(),
                    on_change: move |v: String| state.write().record.building_area = v,
                }

                div { style: "display: flex; gap: 12px; margin-top: 16px;",
                    button {
                        style: "flex: 1; padding: 14px; border-radius: 10px; border: none; background: #2563eb; color: white; font-size: 16px; font-weight: bold;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let (record, photo) = {
                                    let st = state.read();
                                    (st.record.clone(), st.photo_bytes.clone())
                                };
                                match svc.render_cover(&record, photo.as_deref()) {
                                    Ok(png) => {
                                        let mut st = state.write();
                                        st.cover_png = Some(png);
                                        st.status_message = None;
                                    }
                                    Err(e) => {
                                        let human = humanize_error(&e);
                                        state.write().status_message = Some(format!(
                                            "{} {}",
                                            human.message, human.suggestion
                                        ));
                                    }
                                }
                            }
                        },
                        "표지 생성"
                    }
                    button {
                        style: "flex: 1; padding: 14px; border-radius: 10px; border: 1px solid #2563eb; background: white; color: #2563eb; font-size: 16px; font-weight: bold;",
                        disabled: state.read().cover_png.is_none(),
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let (name, png) = {
                                    let st = state.read();
                                    (st.record.cover_file_name(), st.cover_png.clone())
                                };
                                let Some(png) = png else { return };
                                let message = match svc.save_one(&name, &png) {
                                    SaveOutcome::Saved => format!("{name} 저장 완료"),
                                    SaveOutcome::Cancelled => "저장을 취소했습니다.".into(),
                                    SaveOutcome::Failed(msg) => msg,
                                };
                                state.write().status_message = Some(message);
                            }
                        },
                        "저장"
                    }
                }

                button {
                    style: "width: 100%; margin-top: 10px; padding: 10px; border-radius: 10px; border: 1px solid #d1d5db; background: white; color: #6b7280; font-size: 14px;",
                    onclick: move |_| {
                        let mut st = state.write();
                        st.record = gavelmark_core::types::AuctionRecord::sample();
                        st.status_message = None;
                    },
                    "예시 값으로 초기화"
                }
            }

            // -- Preview ------------------------------------------------------
            div { style: "flex: 1; min-width: 360px;",
                h2 { style: "margin-top: 0;", "미리보기" }
                if let Some(src) = preview_src {
                    img {
                        src: "{src}",
                        style: "width: 100%; max-width: 640px; border: 1px solid #e5e7eb; border-radius: 8px;",
                    }
                } else {
                    p { style: "color: #9ca3af;", "표지를 생성하면 여기에 표시됩니다." }
                }
            }
        }
    }
}

/// One labelled text input bound to a record field.
#[component]
fn Field(label: &'static str, value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        div { style: "margin-bottom: 10px;",
            label { style: "display: block; font-size: 13px; color: #6b7280; margin-bottom: 4px;",
                "{label}"
            }
            input {
                style: "width: 100%; padding: 8px 10px; border: 1px solid #d1d5db; border-radius: 8px; font-size: 15px; box-sizing: border-box;",
                value: "{value}",
                oninput: move |evt| on_change.call(evt.value()),
            }
        }
    }
}

fn pick_photo(state: &mut Signal<AppState>) {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp"])
            .pick_file()
        {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "photo".into());
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let mut st = state.write();
                    st.photo_bytes = Some(bytes);
                    st.photo_name = Some(name);
                    st.status_message = None;
                }
                Err(e) => {
                    state.write().status_message = Some(format!("사진을 읽을 수 없습니다: {e}"));
                }
            }
        }
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        state.write().status_message = Some("이 플랫폼에서는 파일 선택을 지원하지 않습니다.".into());
    }
}
