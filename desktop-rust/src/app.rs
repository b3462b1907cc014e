use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, RichText};
use png_meta_search::config::Config;
use png_meta_search::error_log::{ErrorLog, ErrorSink};
use png_meta_search::scanner::load_metadata;
use png_meta_search::search::SearchRequest;
use png_meta_search::shell::{platform_shell, ShellActions};
use png_meta_search::error::SearchError;
use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::io::load_preview;
use crate::model::{selection, SearchSession, NO_SELECTION_MESSAGE};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct SearchApp {
    config: Config,
    error_log: ErrorLog,
    shell: Box<dyn ShellActions>,
    folder: Option<PathBuf>,
    include_raw: String,
    exclude_raw: String,
    session: Option<SearchSession>,
    preview: Option<Preview>,
    scroll_to_selected: bool,
}

struct Preview {
    path: PathBuf,
    /// 読み込み失敗時は None
    texture: Option<egui::TextureHandle>,
}

impl SearchApp {
    pub fn new(config: Config) -> Self {
        let error_log = config.error_log();
        let shell = platform_shell();
        log::info!("シェル連携: {}", shell.name());
        Self {
            folder: config.last_folder.clone(),
            config,
            error_log,
            shell,
            include_raw: String::new(),
            exclude_raw: String::new(),
            session: None,
            preview: None,
            scroll_to_selected: false,
        }
    }

    fn choose_folder(&mut self) {
        let mut dialog = rfd::FileDialog::new();
        if let Some(folder) = &self.folder {
            dialog = dialog.set_directory(folder);
        }
        if let Some(folder) = dialog.pick_folder() {
            self.folder = Some(folder);
            self.session = None;
            self.preview = None;
        }
    }

    fn run_search(&mut self) {
        let request = match SearchRequest::from_input(self.folder.clone(), &self.include_raw, &self.exclude_raw) {
            Ok(mut request) => {
                request.exclude = self.config.merged_exclude(request.exclude);
                request
            }
            Err(SearchError::InvalidInput(message)) => {
                show_message(MessageLevel::Info, "Input Error", &message);
                return;
            }
            Err(err) => {
                show_message(MessageLevel::Error, "Error", &err.to_string());
                return;
            }
        };

        self.preview = None;
        match request.run(&self.error_log) {
            Ok(outcome) => {
                self.session = Some(SearchSession::new(request.folder.clone(), outcome));
                self.scroll_to_selected = true;
            }
            Err(err) => {
                self.error_log.record("run_search", &err);
                show_message(MessageLevel::Error, "Error", &format!("Search failed:\n{err}"));
                return;
            }
        }

        if self.config.last_folder.as_ref() != Some(&request.folder) {
            self.config.last_folder = Some(request.folder);
            if let Err(err) = self.config.save() {
                log::warn!("設定を保存できません: {err}");
            }
        }
    }

    fn open_image_viewer(&self, session: &SearchSession) {
        let Some(path) = session.selected_path() else {
            return;
        };
        if let Err(err) = self.shell.open_file(path) {
            self.error_log.record("open_image_viewer", &err);
            show_message(MessageLevel::Error, "Error", &format!("Failed to open image:\n{err}"));
        }
    }

    fn show_in_explorer(&self, session: Option<&SearchSession>) {
        let Some(path) = selection(session) else {
            show_message(MessageLevel::Info, "Open File Location", NO_SELECTION_MESSAGE);
            return;
        };
        if let Err(err) = self.shell.reveal_in_folder(path) {
            self.error_log.record("show_in_explorer", &err);
            show_message(MessageLevel::Error, "Error", &format!("Failed to open folder:\n{err}"));
        }
    }

    fn copy_file_path(&self, ctx: &egui::Context, session: Option<&SearchSession>) {
        let Some(path) = selection(session) else {
            show_message(MessageLevel::Info, "Copy Path", NO_SELECTION_MESSAGE);
            return;
        };
        let text = path.display().to_string();
        ctx.output_mut(|o| o.copied_text = text.clone());
        show_message(MessageLevel::Info, "Copy Path", &format!("Copied to clipboard:\n{text}"));
    }

    fn copy_metadata(&self, ctx: &egui::Context, session: &SearchSession) {
        let Some(path) = session.selected_path() else {
            show_message(MessageLevel::Info, "Copy Metadata", NO_SELECTION_MESSAGE);
            return;
        };
        let metadata = load_metadata(path, &self.error_log);
        if metadata.is_empty() {
            show_message(MessageLevel::Info, "Copy Metadata", "No metadata found for this image.");
        } else {
            ctx.output_mut(|o| o.copied_text = metadata.to_clipboard_text());
            show_message(MessageLevel::Info, "Copy Metadata", "Metadata copied to clipboard.");
        }
    }

    /// 選択中の画像とプレビューがずれていれば読み直す
    fn update_preview(&mut self, ctx: &egui::Context) {
        let selected = self
            .session
            .as_ref()
            .and_then(|s| s.selected_path())
            .map(Path::to_path_buf);

        let Some(path) = selected else {
            self.preview = None;
            return;
        };
        if self.preview.as_ref().is_some_and(|p| p.path == path) {
            return;
        }

        let texture = match load_preview(&path, self.config.preview_max_size) {
            Ok(image) => Some(ctx.load_texture(path.display().to_string(), image, egui::TextureOptions::default())),
            Err(err) => {
                self.error_log.record("update_preview", &format!("{err:#}"));
                None
            }
        };
        self.preview = Some(Preview { path, texture });
    }

    fn handle_arrow_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (up, down) = ctx.input(|i| (i.key_pressed(egui::Key::ArrowUp), i.key_pressed(egui::Key::ArrowDown)));
        if up {
            session.select_previous();
            self.scroll_to_selected = true;
        }
        if down {
            session.select_next();
            self.scroll_to_selected = true;
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut search = false;

        ui.horizontal(|ui| {
            if ui.button("Choose Your ComfyUI output folder").clicked() {
                self.choose_folder();
            }
            let folder_text = self
                .folder
                .as_ref()
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "No folder selected".to_string());
            ui.label(RichText::new(folder_text).color(Color32::from_gray(170)));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format!("v{APP_VERSION}")).color(Color32::from_gray(120)));
            });
        });

        egui::Grid::new("keyword_grid").num_columns(2).show(ui, |ui| {
            ui.label("Keyword(s) (include, comma or space separated):");
            let response = ui.add(egui::TextEdit::singleline(&mut self.include_raw).desired_width(280.0));
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                search = true;
            }
            ui.end_row();

            ui.label("Exclude Keyword(s) (comma or space separated):");
            let response = ui.add(egui::TextEdit::singleline(&mut self.exclude_raw).desired_width(280.0));
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                search = true;
            }
            ui.end_row();
        });

        ui.horizontal(|ui| {
            if ui.button("Search").clicked() {
                search = true;
            }
            if let Some(session) = &self.session {
                ui.label(session.summary());
            }
        });

        search
    }

    fn render_results(&mut self, ui: &mut egui::Ui) {
        match self.session.take() {
            Some(mut session) => {
                self.render_match_list(ui, &mut session);
                self.session = Some(session);
            }
            None => {
                ui.label(RichText::new("Choose a folder and search.").color(Color32::from_gray(150)));
            }
        }

        // 検索前でも押せる（未選択ならダイアログで知らせる）
        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Open File Location").clicked() {
                self.show_in_explorer(self.session.as_ref());
            }
            if ui.button("Copy File Path").clicked() {
                self.copy_file_path(ui.ctx(), self.session.as_ref());
            }
        });
    }

    fn render_match_list(&mut self, ui: &mut egui::Ui, session: &mut SearchSession) {
        ui.label(RichText::new(session.folder.display().to_string()).color(Color32::from_gray(150)).size(11.0));
        ui.separator();

        if session.is_empty() {
            ui.label("No matches found.");
        } else {
            let scroll = std::mem::take(&mut self.scroll_to_selected);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .max_height(ui.available_height() - 40.0)
                .show(ui, |ui| {
                    for index in 0..session.len() {
                        let is_selected = session.selected_index == Some(index);
                        let response = ui.selectable_label(is_selected, session.file_name(index));
                        if is_selected && scroll {
                            response.scroll_to_me(Some(egui::Align::Center));
                        }
                        if response.clicked() || response.secondary_clicked() {
                            session.select(index);
                        }
                        if response.double_clicked() {
                            session.select(index);
                            self.open_image_viewer(session);
                        }
                        response.context_menu(|ui| {
                            if ui.button("Open in Default Viewer").clicked() {
                                self.open_image_viewer(session);
                                ui.close_menu();
                            }
                            if ui.button("Open Containing Folder (Highlight File)").clicked() {
                                self.show_in_explorer(Some(&*session));
                                ui.close_menu();
                            }
                        });
                    }
                });
        }
    }

    fn render_preview(&mut self, ui: &mut egui::Ui) {
        let Some(session) = self.session.take() else {
            return;
        };

        if let Some(Preview { texture: Some(texture), .. }) = &self.preview {
            let max = ui.available_size();
            let image = egui::Image::new(texture)
                .fit_to_original_size(1.0)
                .max_size(max)
                .sense(egui::Sense::click());
            let response = ui
                .with_layout(egui::Layout::centered_and_justified(egui::Direction::TopDown), |ui| ui.add(image))
                .inner;
            response.context_menu(|ui| {
                if ui.button("Copy Metadata to Clipboard").clicked() {
                    self.copy_metadata(ui.ctx(), &session);
                    ui.close_menu();
                }
                if ui.button("Open Image in Default Viewer").clicked() {
                    self.open_image_viewer(&session);
                    ui.close_menu();
                }
                if ui.button("Open Containing Folder (Highlight File)").clicked() {
                    self.show_in_explorer(Some(&session));
                    ui.close_menu();
                }
            });
        } else if self.preview.is_some() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Preview unavailable").color(Color32::from_gray(150)));
            });
        }

        self.session = Some(session);
    }
}

impl eframe::App for SearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_arrow_keys(ctx);

        let mut search = false;
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            search = self.render_controls(ui);
            ui.add_space(4.0);
        });

        if search {
            self.run_search();
        }
        self.update_preview(ctx);

        egui::SidePanel::left("results")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                self.render_results(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_preview(ui);
        });
    }
}

fn show_message(level: MessageLevel, title: &str, description: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}
