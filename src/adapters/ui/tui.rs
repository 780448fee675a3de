//! Implements InputPort. Inquire-based interactive menu over the presentation states.
//!
//! Every backend call runs under a spinner and can be abandoned with Ctrl-C,
//! which drops the in-flight request and returns to the menu.

use crate::app::UseCases;
use crate::domain::{DomainError, RecipeDetail, RecipeSummary};
use crate::ports::{InputPort, RecipeRepository};
use crate::presentation::{
    AuthState, EditorMode, RecipeDetailState, RecipeEditorState, RecipeImportState, RecipeListState,
    ScreenStatus, SearchRecipesState, SignUpForm,
};
use crate::usecases::with_cancellation;
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireResult;
use inquire::ui::{Color as PromptColor, RenderConfig, StyleSheet, Styled};
use inquire::{Confirm, InquireError, Password, Select, Text};
use std::fmt;
use std::future::Future;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Neon prompt theme applied to every inquire prompt.
pub fn apply_theme() {
    let mut config = RenderConfig::default();
    config.prompt_prefix = Styled::new("›").with_fg(PromptColor::LightMagenta);
    config.highlighted_option_prefix = Styled::new("➤").with_fg(PromptColor::LightCyan);
    config.selected_option = Some(StyleSheet::new().with_fg(PromptColor::LightCyan));
    inquire::set_global_render_config(config);
}

fn print_colored(color: Color, line: &str) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(line));
    let _ = out.execute(Print("\r\n"));
    let _ = out.execute(ResetColor);
}

fn print_info(line: &str) {
    print_colored(Color::Cyan, line);
}

/// Show and acknowledge a pending alert.
fn show_alert(status: &mut ScreenStatus) {
    if let Some(message) = status.error_message.as_deref() {
        print_colored(Color::Red, &format!("✗ {message}"));
    }
    status.clear_error();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
        pb.set_style(style.tick_strings(&["▁▂▃", "▂▃▄", "▃▄▅", "▄▅▆", "▅▆▇", "▆▇█", "✓"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Run `operation` under a spinner, abandoning it on Ctrl-C.
async fn guarded<T, F>(message: &str, operation: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    let pb = spinner(message);
    let result = with_cancellation(operation, ctrl_c()).await;
    pb.finish_and_clear();
    if matches!(result, Err(DomainError::Cancelled)) {
        print_info("Cancelled.");
    }
    result
}

/// `Ok(None)` when the user backs out with Esc; Ctrl-C inside a prompt ends the session.
fn answered<T>(result: InquireResult<T>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(InquireError::OperationInterrupted) => Err(DomainError::Cancelled),
        Err(e) => Err(DomainError::Unknown(e.to_string())),
    }
}

fn text(prompt: &str, initial: &str) -> Result<Option<String>, DomainError> {
    answered(Text::new(prompt).with_initial_value(initial).prompt())
}

fn confirm(prompt: &str) -> Result<bool, DomainError> {
    Ok(answered(Confirm::new(prompt).with_default(false).prompt())?.unwrap_or(false))
}

/// Index of the chosen option, or `None` on Esc.
fn choose<T: fmt::Display>(prompt: &str, options: Vec<T>) -> Result<Option<usize>, DomainError> {
    if options.is_empty() {
        return Ok(None);
    }
    Ok(answered(Select::new(prompt, options).raw_prompt())?.map(|o| o.index))
}

fn summary_line(recipe: &RecipeSummary) -> String {
    format!(
        "{}  ({})",
        recipe.display_title(),
        recipe.created_at.format("%Y-%m-%d")
    )
}

fn print_recipe(recipe: &RecipeDetail) {
    print_colored(Color::Magenta, &format!("\r\n{}", recipe.display_title()));
    if let Some(url) = recipe.media_url.as_deref() {
        print_info(&format!("Source: {url}"));
    }
    for group in &recipe.ingredient_groups {
        print_info(&format!("[{}]", group.display_title()));
        for ingredient in &group.ingredients {
            println!("  - {} {}", ingredient.ingredient_name, ingredient.display_amount());
        }
    }
    if let Some(memo) = recipe.memo.as_deref().filter(|m| !m.is_empty()) {
        print_info(&format!("Memo: {memo}"));
    }
    if let Some(cooked) = recipe.last_cooked_at {
        print_info(&format!("Last cooked: {}", cooked.format("%Y-%m-%d")));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Browse,
    SearchTitle,
    SearchIngredient,
    NewRecipe,
    Import,
    SignIn,
    SignUp,
    SignOut,
    DeleteAccount,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Browse => "Browse recipes",
            Self::SearchTitle => "Search by title",
            Self::SearchIngredient => "Search by ingredient",
            Self::NewRecipe => "New recipe",
            Self::Import => "Import from URL",
            Self::SignIn => "Sign in",
            Self::SignUp => "Create account",
            Self::SignOut => "Sign out",
            Self::DeleteAccount => "Delete account",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn menu_items(signed_in: bool) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::Browse,
        MenuItem::SearchTitle,
        MenuItem::SearchIngredient,
        MenuItem::NewRecipe,
        MenuItem::Import,
    ];
    if signed_in {
        items.extend([MenuItem::SignOut, MenuItem::DeleteAccount]);
    } else {
        items.extend([MenuItem::SignIn, MenuItem::SignUp]);
    }
    items.push(MenuItem::Quit);
    items
}

#[derive(Debug, Clone, Copy)]
enum EditAction {
    Title,
    Memo,
    MediaUrl,
    AddIngredient,
    RemoveIngredient,
    AddGroup,
    RenameGroup,
    RemoveGroup,
    Save,
    Discard,
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Title => "Edit title",
            Self::Memo => "Edit memo",
            Self::MediaUrl => "Edit source URL",
            Self::AddIngredient => "Add ingredient",
            Self::RemoveIngredient => "Remove ingredient",
            Self::AddGroup => "Add ingredient group",
            Self::RenameGroup => "Rename ingredient group",
            Self::RemoveGroup => "Remove ingredient group",
            Self::Save => "Save",
            Self::Discard => "Discard",
        };
        f.write_str(label)
    }
}

const EDIT_ACTIONS: [EditAction; 10] = [
    EditAction::Title,
    EditAction::Memo,
    EditAction::MediaUrl,
    EditAction::AddIngredient,
    EditAction::RemoveIngredient,
    EditAction::AddGroup,
    EditAction::RenameGroup,
    EditAction::RemoveGroup,
    EditAction::Save,
    EditAction::Discard,
];

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    repository: Arc<dyn RecipeRepository>,
    use_cases: Arc<UseCases>,
}

impl TuiInputPort {
    pub fn new(repository: Arc<dyn RecipeRepository>, use_cases: Arc<UseCases>) -> Self {
        Self {
            repository,
            use_cases,
        }
    }

    async fn restore_session(&self, auth: &mut AuthState) {
        match self.repository.get_current_user().await {
            Ok(Some(user)) => auth.apply_signed_in(Ok(user)),
            Ok(None) => {}
            Err(e) => debug!(error = %e, "no session restored"),
        }
    }

    async fn browse(&self) -> Result<(), DomainError> {
        let mut list = RecipeListState::new();
        loop {
            list.begin();
            let result = guarded("Loading recipes", self.use_cases.get_recipe_list.execute()).await;
            list.apply_recipes(result);
            show_alert(&mut list.status);
            if !list.has_recipes() {
                print_info("No recipes yet.");
                return Ok(());
            }
            let options = list.recipes.iter().map(summary_line).collect();
            let Some(index) = choose("Recipes", options)? else {
                return Ok(());
            };
            let recipe_id = list.recipes[index].recipe_id.clone();
            self.show_recipe(&recipe_id).await?;
        }
    }

    async fn search(&self, by_ingredient: bool) -> Result<(), DomainError> {
        let prompt = if by_ingredient { "Ingredient:" } else { "Title:" };
        let Some(query) = text(prompt, "")? else {
            return Ok(());
        };
        let mut state = SearchRecipesState::new();
        if !state.begin() {
            return Ok(());
        }
        let search = &self.use_cases.search_recipes;
        let result = if by_ingredient {
            guarded("Searching", search.search_by_ingredient(&query)).await
        } else {
            guarded("Searching", search.search_by_title(&query)).await
        };
        state.apply_results(result);
        show_alert(&mut state.status);
        if state.results.is_empty() {
            print_info("No matching recipes.");
            return Ok(());
        }
        let options = state.results.iter().map(summary_line).collect();
        if let Some(index) = choose("Results", options)? {
            let recipe_id = state.results[index].recipe_id.clone();
            self.show_recipe(&recipe_id).await?;
        }
        Ok(())
    }

    async fn show_recipe(&self, recipe_id: &str) -> Result<(), DomainError> {
        let mut detail = RecipeDetailState::new(recipe_id);
        detail.begin();
        let result = guarded(
            "Loading recipe",
            self.use_cases.get_recipe_detail.execute(recipe_id),
        )
        .await;
        detail.apply_recipe(result);
        show_alert(&mut detail.status);
        let Some(recipe) = detail.recipe.as_ref() else {
            return Ok(());
        };
        print_recipe(recipe);

        match choose("Action", vec!["Edit", "Delete", "Back"])? {
            Some(0) => {
                let mut editor = RecipeEditorState::new_edit(recipe_id);
                editor.status.begin();
                let result = guarded(
                    "Loading recipe",
                    self.use_cases.get_recipe_detail.execute(recipe_id),
                )
                .await;
                editor.apply_loaded(result);
                show_alert(&mut editor.status);
                self.edit(&mut editor).await?;
            }
            Some(1) if confirm("Delete this recipe?")? => {
                detail.begin_delete();
                let result =
                    guarded("Deleting", self.use_cases.delete_recipe.execute(recipe_id)).await;
                detail.apply_deleted(result);
                show_alert(&mut detail.status);
                if detail.is_deleted {
                    print_info("Recipe deleted.");
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn import(&self) -> Result<(), DomainError> {
        let Some(url) = text("Recipe page URL:", "")? else {
            return Ok(());
        };
        let mut state = RecipeImportState {
            url,
            ..RecipeImportState::default()
        };
        state.begin();
        let result = guarded(
            "Importing",
            self.use_cases.fetch_recipe_from_url.execute(&state.url),
        )
        .await;
        state.apply_recipe(result);
        show_alert(&mut state.status);
        if let Some(mut editor) = state.to_editor() {
            print_info("Imported. Review before saving.");
            self.edit(&mut editor).await?;
        }
        Ok(())
    }

    async fn edit(&self, editor: &mut RecipeEditorState) -> Result<(), DomainError> {
        loop {
            print_editor(editor);
            let Some(index) = choose("Edit recipe", EDIT_ACTIONS.to_vec())? else {
                return Ok(());
            };
            match EDIT_ACTIONS[index] {
                EditAction::Title => {
                    if let Some(title) = text("Title:", &editor.title)? {
                        editor.title = title;
                    }
                }
                EditAction::Memo => {
                    if let Some(memo) = text("Memo:", &editor.memo)? {
                        editor.memo = memo;
                    }
                }
                EditAction::MediaUrl => {
                    if let Some(url) = text("Source URL:", &editor.media_url)? {
                        editor.media_url = url;
                    }
                }
                EditAction::AddIngredient => add_ingredient(editor)?,
                EditAction::RemoveIngredient => remove_ingredient(editor)?,
                EditAction::AddGroup => editor.add_group(),
                EditAction::RenameGroup => {
                    if let Some(group) = pick_group(editor)? {
                        if let Some(title) = text("Group title:", "")? {
                            editor.rename_group(group, &title);
                        }
                    }
                }
                EditAction::RemoveGroup => {
                    if let Some(group) = pick_group(editor)? {
                        editor.remove_group(group);
                    }
                }
                EditAction::Save => {
                    self.save(editor).await;
                    show_alert(&mut editor.status);
                    if editor.is_saved {
                        print_info("Saved.");
                        return Ok(());
                    }
                }
                EditAction::Discard => {
                    let has_edits = editor.has_content() || editor.has_changes();
                    if !has_edits || confirm("Discard your changes?")? {
                        return Ok(());
                    }
                }
            }
        }
    }

    async fn save(&self, editor: &mut RecipeEditorState) {
        match editor.mode.clone() {
            EditorMode::Create => match editor.create_request() {
                Ok(request) => {
                    editor.begin_save();
                    let result =
                        guarded("Saving", self.use_cases.create_recipe.execute(&request)).await;
                    editor.apply_created(result);
                }
                Err(message) => editor.status.fail(message),
            },
            EditorMode::Edit { recipe_id } => {
                match editor.update_request(&recipe_id) {
                    Ok(request) => {
                        editor.begin_save();
                        let result =
                            guarded("Saving", self.use_cases.update_recipe.execute(&request))
                                .await;
                        editor.apply_updated(result);
                    }
                    Err(message) => editor.status.fail(message),
                }
            }
        }
    }

    async fn sign_in(&self, auth: &mut AuthState) -> Result<(), DomainError> {
        let Some(email) = text("Email:", "")? else {
            return Ok(());
        };
        let Some(password) = answered(Password::new("Password:").without_confirmation().prompt())?
        else {
            return Ok(());
        };
        auth.begin();
        let result = guarded(
            "Signing in",
            self.use_cases.sign_in.execute(&email, &password),
        )
        .await;
        auth.apply_signed_in(result);
        show_alert(&mut auth.status);
        if auth.has_valid_session() {
            print_info(&format!("Welcome, {}.", auth.user_display_name()));
        }
        Ok(())
    }

    async fn sign_up(&self) -> Result<(), DomainError> {
        let mut form = SignUpForm::new();
        let Some(email) = text("Email:", "")? else {
            return Ok(());
        };
        let Some(password) = answered(Password::new("Password (8+ characters):").prompt())? else {
            return Ok(());
        };
        form.email = email;
        form.password = password;
        let strength = form.password_strength().label();
        if !strength.is_empty() {
            print_info(&format!("Password strength: {strength}"));
        }
        form.begin();
        let result = guarded(
            "Creating account",
            self.use_cases.sign_up.execute(&form.email, &form.password),
        )
        .await;
        form.apply_signed_up(result);
        show_alert(&mut form.status);
        if form.is_showing_success {
            print_info("Account created. You can sign in now.");
        }
        Ok(())
    }

    async fn sign_out(&self, auth: &mut AuthState) {
        auth.begin();
        let result = guarded("Signing out", self.use_cases.sign_out.execute()).await;
        auth.apply_signed_out(result);
        show_alert(&mut auth.status);
    }

    async fn delete_account(&self, auth: &mut AuthState) -> Result<(), DomainError> {
        if !confirm("Delete your account and all recipes? This cannot be undone.")? {
            return Ok(());
        }
        auth.begin();
        let result = guarded("Deleting account", self.use_cases.delete_account.execute()).await;
        auth.apply_signed_out(result);
        show_alert(&mut auth.status);
        if !auth.has_valid_session() {
            print_info("Account deleted.");
        }
        Ok(())
    }

    async fn dispatch(&self, item: MenuItem, auth: &mut AuthState) -> Result<(), DomainError> {
        match item {
            MenuItem::Browse => self.browse().await,
            MenuItem::SearchTitle => self.search(false).await,
            MenuItem::SearchIngredient => self.search(true).await,
            MenuItem::NewRecipe => self.edit(&mut RecipeEditorState::new_create()).await,
            MenuItem::Import => self.import().await,
            MenuItem::SignIn => self.sign_in(auth).await,
            MenuItem::SignUp => self.sign_up().await,
            MenuItem::SignOut => {
                self.sign_out(auth).await;
                Ok(())
            }
            MenuItem::DeleteAccount => self.delete_account(auth).await,
            MenuItem::Quit => Ok(()),
        }
    }
}

fn print_editor(editor: &RecipeEditorState) {
    let title = if editor.title.trim().is_empty() {
        "(untitled)"
    } else {
        editor.title.as_str()
    };
    print_colored(Color::Magenta, &format!("\r\n{title}"));
    for group in &editor.ingredient_groups {
        print_info(&format!("[{}]", group.display_title()));
        for ingredient in group.ingredients.iter().filter(|i| i.is_valid()) {
            println!("  - {} {}", ingredient.ingredient_name, ingredient.display_amount());
        }
    }
}

fn pick_group(editor: &RecipeEditorState) -> Result<Option<usize>, DomainError> {
    match editor.ingredient_groups.len() {
        0 => Ok(None),
        1 => Ok(Some(0)),
        _ => {
            let options = editor
                .ingredient_groups
                .iter()
                .map(|g| g.display_title().to_string())
                .collect();
            choose("Group", options)
        }
    }
}

/// Fills the first blank row of the chosen group, adding a row when none is blank.
fn add_ingredient(editor: &mut RecipeEditorState) -> Result<(), DomainError> {
    if editor.ingredient_groups.is_empty() {
        editor.add_group();
    }
    let Some(group) = pick_group(editor)? else {
        return Ok(());
    };
    let Some(name) = text("Ingredient:", "")? else {
        return Ok(());
    };
    let amount = text("Amount (optional):", "")?.unwrap_or_default();
    let blank_row = editor.ingredient_groups[group]
        .ingredients
        .iter()
        .position(|i| !i.is_valid());
    let row = match blank_row {
        Some(row) => row,
        None => {
            editor.add_ingredient(group);
            editor.ingredient_groups[group].ingredients.len() - 1
        }
    };
    editor.update_ingredient(group, row, &name, &amount);
    Ok(())
}

fn remove_ingredient(editor: &mut RecipeEditorState) -> Result<(), DomainError> {
    let rows: Vec<(usize, usize, String)> = editor
        .ingredient_groups
        .iter()
        .enumerate()
        .flat_map(|(g, group)| {
            group
                .ingredients
                .iter()
                .enumerate()
                .filter(|(_, i)| i.is_valid())
                .map(move |(i, ingredient)| {
                    let label = format!("{} / {}", group.display_title(), ingredient.ingredient_name);
                    (g, i, label)
                })
        })
        .collect();
    let labels = rows.iter().map(|(_, _, label)| label.clone()).collect();
    if let Some(index) = choose("Remove which ingredient?", labels)? {
        let (group, row, _) = rows[index];
        editor.remove_ingredient(group, row);
    }
    Ok(())
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut auth = AuthState::new();
        self.restore_session(&mut auth).await;
        if auth.has_valid_session() {
            print_info(&format!("Signed in as {}.", auth.user_display_name()));
        }

        loop {
            let items = menu_items(auth.has_valid_session());
            let item = match choose("What would you like to do?", items.clone()) {
                Ok(Some(index)) => items[index],
                Ok(None) | Err(DomainError::Cancelled) => MenuItem::Quit,
                Err(e) => return Err(e),
            };
            if item == MenuItem::Quit {
                return Ok(());
            }
            match self.dispatch(item, &mut auth).await {
                Ok(()) => {}
                // Ctrl-C at a prompt ends the session; inside a request it only aborts the request.
                Err(DomainError::Cancelled) => return Ok(()),
                Err(e) => print_colored(Color::Red, &format!("✗ {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_depends_on_session() {
        let guest = menu_items(false);
        assert!(guest.contains(&MenuItem::SignIn));
        assert!(!guest.contains(&MenuItem::DeleteAccount));

        let member = menu_items(true);
        assert!(member.contains(&MenuItem::SignOut));
        assert_eq!(member.last(), Some(&MenuItem::Quit));
    }

    #[test]
    fn test_prompt_outcomes() {
        assert_eq!(answered(Ok(3)), Ok(Some(3)));
        assert_eq!(answered::<u8>(Err(InquireError::OperationCanceled)), Ok(None));
        assert_eq!(
            answered::<u8>(Err(InquireError::OperationInterrupted)),
            Err(DomainError::Cancelled)
        );
    }

    #[tokio::test]
    async fn test_guarded_passes_result_through() {
        let result = guarded("working", async { Ok::<_, DomainError>(5) }).await;
        assert_eq!(result, Ok(5));
    }
}
