//! Recipe form shared by the create and edit screens.
//!
//! Group and ingredient edits replace the touched group with a new value
//! rather than mutating it. Out-of-range indices are ignored.

use super::{ScreenStatus, error_message};
use crate::domain::entities::DEFAULT_GROUP_TITLE;
use crate::domain::{
    CreateRecipeRequest, DomainError, Ingredient, IngredientGroup, RecipeDetail,
    UpdateRecipeRequest, ValidationError,
};
use crate::usecases::{CreateRecipeUseCase, GetRecipeDetailUseCase, UpdateRecipeUseCase};
use uuid::Uuid;

pub const NO_INGREDIENTS_MESSAGE: &str = "At least one ingredient is required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { recipe_id: String },
}

#[derive(Debug, Clone)]
pub struct RecipeEditorState {
    pub mode: EditorMode,
    pub title: String,
    pub memo: String,
    pub thumbnail_url: String,
    pub media_url: String,
    pub ingredient_groups: Vec<IngredientGroup>,
    pub is_saving: bool,
    pub is_saved: bool,
    pub created_recipe_id: Option<String>,
    pub status: ScreenStatus,
    original: Option<RecipeDetail>,
}

fn blank_ingredient(order_num: i32) -> Ingredient {
    Ingredient {
        id: format!("ingredient-{}", Uuid::new_v4()),
        ingredient_name: String::new(),
        amount: None,
        order_num,
    }
}

fn initial_group() -> IngredientGroup {
    IngredientGroup {
        group_id: format!("group-{}", Uuid::new_v4()),
        title: Some(DEFAULT_GROUP_TITLE.to_string()),
        order_num: 1,
        ingredients: vec![blank_ingredient(1)],
    }
}

/// 1-based position after `len` existing items.
fn next_order(len: usize) -> i32 {
    i32::try_from(len + 1).unwrap_or(i32::MAX)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn same_groups(lhs: &[IngredientGroup], rhs: &[IngredientGroup]) -> bool {
    lhs.len() == rhs.len()
        && lhs.iter().zip(rhs).all(|(a, b)| {
            a.title == b.title
                && a.ingredients.len() == b.ingredients.len()
                && a.ingredients.iter().zip(&b.ingredients).all(|(x, y)| {
                    x.ingredient_name == y.ingredient_name && x.amount == y.amount
                })
        })
}

impl RecipeEditorState {
    fn empty(mode: EditorMode, ingredient_groups: Vec<IngredientGroup>) -> Self {
        Self {
            mode,
            title: String::new(),
            memo: String::new(),
            thumbnail_url: String::new(),
            media_url: String::new(),
            ingredient_groups,
            is_saving: false,
            is_saved: false,
            created_recipe_id: None,
            status: ScreenStatus::default(),
            original: None,
        }
    }

    /// Blank create form with one group holding one empty ingredient row.
    pub fn new_create() -> Self {
        Self::empty(EditorMode::Create, vec![initial_group()])
    }

    /// Edit form; call `load_with` to fill it.
    pub fn new_edit(recipe_id: impl Into<String>) -> Self {
        Self::empty(
            EditorMode::Edit {
                recipe_id: recipe_id.into(),
            },
            Vec::new(),
        )
    }

    /// Create form prefilled from an imported recipe.
    pub fn from_import(recipe: &RecipeDetail) -> Self {
        let mut state = Self::new_create();
        state.fill_from(recipe);
        if state.ingredient_groups.is_empty() {
            state.ingredient_groups.push(initial_group());
        }
        state
    }

    fn fill_from(&mut self, recipe: &RecipeDetail) {
        self.title = recipe.title.clone();
        self.memo = recipe.memo.clone().unwrap_or_default();
        self.thumbnail_url = recipe.thumbnail_url.clone().unwrap_or_default();
        self.media_url = recipe.media_url.clone().unwrap_or_default();
        self.ingredient_groups = recipe.ingredient_groups.clone();
    }

    fn is_create(&self) -> bool {
        self.mode == EditorMode::Create
    }

    fn replace_group(&mut self, index: usize, edit: impl FnOnce(&IngredientGroup) -> IngredientGroup) {
        if let Some(slot) = self.ingredient_groups.get_mut(index) {
            *slot = edit(slot);
        }
    }

    fn has_ingredient(&self, group: usize, ingredient: usize) -> bool {
        self.ingredient_groups
            .get(group)
            .is_some_and(|g| ingredient < g.ingredients.len())
    }

    pub fn add_group(&mut self) {
        let count = self.ingredient_groups.len();
        let ingredients = if self.is_create() {
            vec![blank_ingredient(1)]
        } else {
            Vec::new()
        };
        self.ingredient_groups.push(IngredientGroup {
            group_id: format!("group-{}", Uuid::new_v4()),
            title: Some(format!("Ingredient group {}", count + 1)),
            order_num: next_order(count),
            ingredients,
        });
    }

    /// In create mode the form always keeps at least one group.
    pub fn remove_group(&mut self, index: usize) {
        if index >= self.ingredient_groups.len() {
            return;
        }
        self.ingredient_groups.remove(index);
        if self.is_create() && self.ingredient_groups.is_empty() {
            self.ingredient_groups.push(initial_group());
        }
    }

    pub fn rename_group(&mut self, index: usize, title: &str) {
        let title = if title.is_empty() {
            DEFAULT_GROUP_TITLE.to_string()
        } else {
            title.to_string()
        };
        self.replace_group(index, |group| IngredientGroup {
            title: Some(title),
            ..group.clone()
        });
    }

    pub fn add_ingredient(&mut self, group: usize) {
        self.replace_group(group, |g| {
            let mut ingredients = g.ingredients.clone();
            ingredients.push(blank_ingredient(next_order(ingredients.len())));
            IngredientGroup {
                ingredients,
                ..g.clone()
            }
        });
    }

    /// In create mode a group never ends up with zero rows.
    pub fn remove_ingredient(&mut self, group: usize, ingredient: usize) {
        if !self.has_ingredient(group, ingredient) {
            return;
        }
        let reseed = self.is_create();
        self.replace_group(group, |g| {
            let mut ingredients = g.ingredients.clone();
            ingredients.remove(ingredient);
            if reseed && ingredients.is_empty() {
                ingredients.push(blank_ingredient(1));
            }
            IngredientGroup {
                ingredients,
                ..g.clone()
            }
        });
    }

    /// An empty `amount` clears it.
    pub fn update_ingredient(&mut self, group: usize, ingredient: usize, name: &str, amount: &str) {
        if !self.has_ingredient(group, ingredient) {
            return;
        }
        self.replace_group(group, |g| {
            let mut ingredients = g.ingredients.clone();
            let updated = Ingredient {
                ingredient_name: name.to_string(),
                amount: non_empty(amount),
                ..ingredients[ingredient].clone()
            };
            ingredients[ingredient] = updated;
            IngredientGroup {
                ingredients,
                ..g.clone()
            }
        });
    }

    /// Groups with blank rows dropped, and groups left with no rows removed.
    pub fn valid_groups(&self) -> Vec<IngredientGroup> {
        self.ingredient_groups
            .iter()
            .filter_map(|g| {
                let ingredients: Vec<Ingredient> =
                    g.ingredients.iter().filter(|i| i.is_valid()).cloned().collect();
                (!ingredients.is_empty()).then(|| IngredientGroup {
                    group_id: g.group_id.clone(),
                    title: g.title.clone(),
                    order_num: g.order_num,
                    ingredients,
                })
            })
            .collect()
    }

    pub fn create_request(&self) -> Result<CreateRecipeRequest, String> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired.to_string());
        }
        let ingredient_groups = self.valid_groups();
        if ingredient_groups.is_empty() {
            return Err(NO_INGREDIENTS_MESSAGE.to_string());
        }
        Ok(CreateRecipeRequest {
            title: self.title.trim().to_string(),
            thumbnail_url: non_empty(&self.thumbnail_url),
            media_url: non_empty(&self.media_url),
            memo: non_empty(&self.memo),
            ingredient_groups,
        })
    }

    /// Groups are sent as edited; the use case rejects blank ingredient names.
    pub fn update_request(&self, recipe_id: &str) -> Result<UpdateRecipeRequest, String> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired.to_string());
        }
        if self.ingredient_groups.is_empty() {
            return Err(NO_INGREDIENTS_MESSAGE.to_string());
        }
        Ok(UpdateRecipeRequest {
            recipe_id: recipe_id.to_string(),
            title: self.title.trim().to_string(),
            thumbnail_url: non_empty(&self.thumbnail_url),
            media_url: non_empty(&self.media_url),
            memo: non_empty(&self.memo),
            ingredient_groups: self.ingredient_groups.clone(),
        })
    }

    pub fn begin_save(&mut self) {
        self.is_saving = true;
        self.is_saved = false;
        self.status.error_message = None;
    }

    pub fn apply_created(&mut self, result: Result<String, DomainError>) {
        match result {
            Ok(recipe_id) => {
                self.created_recipe_id = Some(recipe_id);
                self.is_saved = true;
            }
            Err(err) => self.status.fail(error_message(&err)),
        }
        self.is_saving = false;
    }

    pub fn apply_updated(&mut self, result: Result<RecipeDetail, DomainError>) {
        match result {
            Ok(recipe) => {
                self.original = Some(recipe);
                self.is_saved = true;
            }
            Err(err) => self.status.fail(error_message(&err)),
        }
        self.is_saving = false;
    }

    pub fn apply_loaded(&mut self, result: Result<RecipeDetail, DomainError>) {
        match result {
            Ok(recipe) => {
                self.fill_from(&recipe);
                self.original = Some(recipe);
            }
            Err(err) => self.status.fail(error_message(&err)),
        }
        self.status.finish();
    }

    /// No-op in create mode.
    pub async fn load_with(&mut self, detail: &GetRecipeDetailUseCase) {
        let EditorMode::Edit { recipe_id } = &self.mode else {
            return;
        };
        let recipe_id = recipe_id.clone();
        self.status.begin();
        let result = detail.execute(&recipe_id).await;
        self.apply_loaded(result);
    }

    pub async fn create_with(&mut self, create: &CreateRecipeUseCase) {
        let request = match self.create_request() {
            Ok(request) => request,
            Err(message) => return self.status.fail(message),
        };
        self.begin_save();
        let result = create.execute(&request).await;
        self.apply_created(result);
    }

    /// No-op in create mode.
    pub async fn update_with(&mut self, update: &UpdateRecipeUseCase) {
        let EditorMode::Edit { recipe_id } = &self.mode else {
            return;
        };
        let request = match self.update_request(recipe_id) {
            Ok(request) => request,
            Err(message) => return self.status.fail(message),
        };
        self.begin_save();
        let result = update.execute(&request).await;
        self.apply_updated(result);
    }

    pub fn has_content(&self) -> bool {
        [&self.title, &self.memo, &self.thumbnail_url, &self.media_url]
            .iter()
            .any(|field| !field.trim().is_empty())
            || self
                .ingredient_groups
                .iter()
                .any(|g| g.ingredients.iter().any(Ingredient::is_valid))
    }

    /// Edit mode only: whether the form differs from the loaded recipe.
    pub fn has_changes(&self) -> bool {
        let Some(original) = &self.original else {
            return false;
        };
        self.title != original.title
            || self.memo != original.memo.clone().unwrap_or_default()
            || self.thumbnail_url != original.thumbnail_url.clone().unwrap_or_default()
            || self.media_url != original.media_url.clone().unwrap_or_default()
            || !same_groups(&self.ingredient_groups, &original.ingredient_groups)
    }

    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty() && !self.ingredient_groups.is_empty() && !self.is_saving
    }
}
