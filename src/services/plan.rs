// SPDX-License-Identifier: MIT
// Copyright 2026 FlexCoach Developers

//! Plan generation: prompt construction, AI calls, and output validation.
//!
//! The model's raw JSON is projected through an allow-list: only the fields
//! of the target schema survive, and `sets`/`reps` are coerced to integers
//! with fixed fallbacks. Everything else the model emitted is dropped.

use crate::error::AppError;
use crate::models::plan::{DietPlan, ExerciseDay, Meal, Routine, WorkoutPlan};
use crate::services::gemini::{GeminiClient, GenerationConfig};
use serde::Deserialize;
use serde_json::Value;

/// Fallback when a routine's `sets` cannot be read as a positive integer.
const DEFAULT_SETS: i64 = 1;
/// Fallback when a routine's `reps` cannot be read as a positive integer.
const DEFAULT_REPS: i64 = 10;

/// How many times a single generation call is attempted. The model
/// occasionally returns non-JSON despite the response mime type; one
/// re-prompt absorbs that without unbounded cost.
const MAX_GENERATION_ATTEMPTS: u32 = 2;

/// User profile driving prompt construction.
///
/// Values arrive from the voice-assistant frontend as strings; missing
/// fields default to empty rather than rejecting the request.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub injuries: String,
    #[serde(default)]
    pub workout_days: String,
    #[serde(default)]
    pub fitness_goal: String,
    #[serde(default)]
    pub fitness_level: String,
    #[serde(default)]
    pub dietary_restrictions: String,
}

/// Both validated plans for one profile.
#[derive(Debug, Clone)]
pub struct GeneratedPlans {
    pub workout_plan: WorkoutPlan,
    pub diet_plan: DietPlan,
}

/// Generate and validate both plans for a profile.
///
/// Calls are sequential: workout first, then diet. Each call gets at most
/// one re-prompt if the output fails to parse or validate.
pub async fn generate_plans(
    gemini: &GeminiClient,
    profile: &UserProfile,
) -> Result<GeneratedPlans, AppError> {
    let config = GenerationConfig::json_plan();

    let workout_plan = generate_validated(
        gemini,
        &workout_prompt(profile),
        &config,
        "workout",
        validate_workout_plan,
    )
    .await?;

    let diet_plan = generate_validated(
        gemini,
        &diet_prompt(profile),
        &config,
        "diet",
        validate_diet_plan,
    )
    .await?;

    Ok(GeneratedPlans {
        workout_plan,
        diet_plan,
    })
}

/// Run one generation call with bounded retry on malformed output.
///
/// Transport errors are not retried; only output that fails to parse or
/// validate triggers the re-prompt.
async fn generate_validated<T>(
    gemini: &GeminiClient,
    prompt: &str,
    config: &GenerationConfig,
    kind: &'static str,
    validate: fn(&Value) -> Result<T, AppError>,
) -> Result<T, AppError> {
    let mut attempt = 0;

    loop {
        attempt += 1;
        let text = gemini.generate(prompt, config).await?;

        let result = serde_json::from_str::<Value>(&text)
            .map_err(|e| AppError::MalformedAiOutput(format!("{} plan is not valid JSON: {}", kind, e)))
            .and_then(|raw| validate(&raw));

        match result {
            Ok(plan) => return Ok(plan),
            Err(e) if attempt < MAX_GENERATION_ATTEMPTS => {
                tracing::warn!(kind, attempt, error = %e, "Discarding malformed model output, re-prompting");
            }
            Err(e) => return Err(e),
        }
    }
}

// ─── Validation ──────────────────────────────────────────────

/// Raw workout plan as emitted by the model. Serde drops unknown fields;
/// `sets`/`reps` stay raw until coerced.
#[derive(Deserialize)]
struct RawWorkoutPlan {
    schedule: Vec<String>,
    exercises: Vec<RawExerciseDay>,
}

#[derive(Deserialize)]
struct RawExerciseDay {
    day: String,
    routines: Vec<RawRoutine>,
}

#[derive(Deserialize)]
struct RawRoutine {
    name: String,
    #[serde(default)]
    sets: Value,
    #[serde(default)]
    reps: Value,
}

/// Raw diet plan as emitted by the model.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDietPlan {
    daily_calories: Value,
    meals: Vec<RawMeal>,
}

#[derive(Deserialize)]
struct RawMeal {
    name: String,
    foods: Vec<String>,
}

/// Coerce a raw count field to an integer, falling back to `default`.
///
/// Numeric literals are kept (floats truncate). Strings are read leniently:
/// a numeric prefix counts, so "12 reps" reads as 12. A zero result falls
/// back to the default, as do negatives and anything non-numeric.
fn coerce_count(raw: &Value, default: i64) -> i64 {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(default),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            match digits.parse::<i64>() {
                Ok(0) | Err(_) => default,
                Ok(n) => n,
            }
        }
        _ => default,
    }
}

/// Project a raw model payload into a validated workout plan.
///
/// Only `schedule` and `exercises[].{day,routines[].{name,sets,reps}}`
/// survive. A structurally missing field is malformed output.
pub fn validate_workout_plan(raw: &Value) -> Result<WorkoutPlan, AppError> {
    let parsed: RawWorkoutPlan = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::MalformedAiOutput(format!("workout plan: {}", e)))?;

    Ok(WorkoutPlan {
        schedule: parsed.schedule,
        exercises: parsed
            .exercises
            .into_iter()
            .map(|day| ExerciseDay {
                day: day.day,
                routines: day
                    .routines
                    .into_iter()
                    .map(|routine| Routine {
                        name: routine.name,
                        sets: coerce_count(&routine.sets, DEFAULT_SETS),
                        reps: coerce_count(&routine.reps, DEFAULT_REPS),
                    })
                    .collect(),
            })
            .collect(),
    })
}

/// Project a raw model payload into a validated diet plan.
///
/// Keeps only `dailyCalories` and `meals[].{name,foods}`; `dailyCalories`
/// is passed through without coercion.
pub fn validate_diet_plan(raw: &Value) -> Result<DietPlan, AppError> {
    let parsed: RawDietPlan = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::MalformedAiOutput(format!("diet plan: {}", e)))?;

    Ok(DietPlan {
        daily_calories: parsed.daily_calories,
        meals: parsed
            .meals
            .into_iter()
            .map(|meal| Meal {
                name: meal.name,
                foods: meal.foods,
            })
            .collect(),
    })
}

// ─── Prompts ─────────────────────────────────────────────────

/// Build the workout-generation prompt with strict schema instructions.
fn workout_prompt(profile: &UserProfile) -> String {
    format!(
        r#"You are an experienced fitness coach creating a personalized workout plan based on:
Age: {age}
Height: {height}
Weight: {weight}
Injuries or limitations: {injuries}
Available days for workout: {workout_days}
Fitness goal: {fitness_goal}
Fitness level: {fitness_level}

As a professional coach:
- Consider muscle group splits to avoid overtraining the same muscles on consecutive days
- Design exercises that match the fitness level and account for any injuries
- Structure the workouts to specifically target the user's fitness goal

CRITICAL SCHEMA INSTRUCTIONS:
- Your output MUST contain ONLY the fields shown below, no additional fields
- "sets" and "reps" MUST ALWAYS be NUMBERS, never text
- For example: "sets": 3, "reps": 10
- Do NOT use text like "reps": "As many as possible" or "reps": "To failure"
- For cardio, use "sets": 1, "reps": 1
- NEVER add extra fields not shown in the example below

Return a JSON object with this EXACT structure:
{{
  "schedule": ["Monday", "Wednesday", "Friday"],
  "exercises": [
    {{
      "day": "Monday",
      "routines": [
        {{
          "name": "Exercise Name",
          "sets": 3,
          "reps": 10
        }}
      ]
    }}
  ]
}}

Your response must be a valid JSON object with no additional text."#,
        age = profile.age,
        height = profile.height,
        weight = profile.weight,
        injuries = profile.injuries,
        workout_days = profile.workout_days,
        fitness_goal = profile.fitness_goal,
        fitness_level = profile.fitness_level,
    )
}

/// Build the diet-generation prompt with strict schema instructions.
fn diet_prompt(profile: &UserProfile) -> String {
    format!(
        r#"You are an experienced nutrition coach creating a personalized diet plan based on:
Age: {age}
Height: {height}
Weight: {weight}
Fitness goal: {fitness_goal}
Dietary restrictions: {dietary_restrictions}

As a professional nutrition coach:
- Calculate appropriate daily calorie intake based on the person's stats and goals
- Create a balanced meal plan with proper macronutrient distribution
- Include a variety of foods while respecting dietary restrictions

CRITICAL SCHEMA INSTRUCTIONS:
- Your output MUST contain ONLY the fields shown below, no additional fields
- "dailyCalories" MUST be a NUMBER, not text
- Do NOT add fields like "supplements", "macros", "notes", or ANYTHING else
- ONLY include the EXACT fields shown in the example below

Return a JSON object with this EXACT structure:
{{
  "dailyCalories": 2000,
  "meals": [
    {{
      "name": "Breakfast",
      "foods": ["Oatmeal with berries", "Greek yogurt"]
    }}
  ]
}}

Your response must be a valid JSON object with no additional text."#,
        age = profile.age,
        height = profile.height,
        weight = profile.weight,
        fitness_goal = profile.fitness_goal,
        dietary_restrictions = profile.dietary_restrictions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_string_sets_parse_and_bad_reps_default() {
        let raw = json!({
            "schedule": ["Monday"],
            "exercises": [{
                "day": "Monday",
                "routines": [{"name": "Bench Press", "sets": "12", "reps": "ten"}]
            }]
        });

        let plan = validate_workout_plan(&raw).unwrap();
        let routine = &plan.exercises[0].routines[0];
        assert_eq!(routine.sets, 12);
        assert_eq!(routine.reps, 10);
    }

    #[test]
    fn test_numeric_sets_and_reps_kept() {
        let raw = json!({
            "schedule": ["Tuesday"],
            "exercises": [{
                "day": "Tuesday",
                "routines": [{"name": "Squat", "sets": 5, "reps": 5}]
            }]
        });

        let plan = validate_workout_plan(&raw).unwrap();
        let routine = &plan.exercises[0].routines[0];
        assert_eq!(routine.sets, 5);
        assert_eq!(routine.reps, 5);
    }

    #[test]
    fn test_missing_counts_fall_back_to_defaults() {
        let raw = json!({
            "schedule": ["Friday"],
            "exercises": [{
                "day": "Friday",
                "routines": [{"name": "Plank"}]
            }]
        });

        let plan = validate_workout_plan(&raw).unwrap();
        let routine = &plan.exercises[0].routines[0];
        assert_eq!(routine.sets, 1);
        assert_eq!(routine.reps, 10);
    }

    #[test]
    fn test_extra_workout_fields_dropped() {
        let raw = json!({
            "schedule": ["Monday"],
            "difficulty": "hard",
            "exercises": [{
                "day": "Monday",
                "warmup": "5 min jog",
                "routines": [{"name": "Deadlift", "sets": 3, "reps": 8, "rest": "90s"}]
            }]
        });

        let plan = validate_workout_plan(&raw).unwrap();
        let serialized = serde_json::to_value(&plan).unwrap();
        assert!(serialized.get("difficulty").is_none());
        assert!(serialized["exercises"][0].get("warmup").is_none());
        assert!(serialized["exercises"][0]["routines"][0].get("rest").is_none());
    }

    #[test]
    fn test_float_counts_truncate() {
        let raw = json!({
            "schedule": ["Monday"],
            "exercises": [{
                "day": "Monday",
                "routines": [{"name": "Row", "sets": 3.7, "reps": 10.2}]
            }]
        });

        let plan = validate_workout_plan(&raw).unwrap();
        let routine = &plan.exercises[0].routines[0];
        assert_eq!(routine.sets, 3);
        assert_eq!(routine.reps, 10);
    }

    #[test]
    fn test_string_with_numeric_prefix_parses() {
        assert_eq!(coerce_count(&json!("12 reps"), 10), 12);
        assert_eq!(coerce_count(&json!("0"), 10), 10);
        assert_eq!(coerce_count(&json!("-3"), 1), 1);
        assert_eq!(coerce_count(&json!(null), 1), 1);
        assert_eq!(coerce_count(&json!(["3"]), 1), 1);
    }

    #[test]
    fn test_missing_schedule_is_malformed() {
        let raw = json!({"exercises": []});

        let err = validate_workout_plan(&raw).unwrap_err();
        assert!(matches!(err, AppError::MalformedAiOutput(_)));
    }

    #[test]
    fn test_extra_diet_fields_dropped() {
        let raw = json!({
            "dailyCalories": 2200,
            "supplements": ["creatine", "whey"],
            "meals": [{
                "name": "Lunch",
                "foods": ["Chicken breast", "Rice"],
                "macros": {"protein": 40}
            }]
        });

        let plan = validate_diet_plan(&raw).unwrap();
        let serialized = serde_json::to_value(&plan).unwrap();
        assert!(serialized.get("supplements").is_none());
        assert!(serialized["meals"][0].get("macros").is_none());
        assert_eq!(serialized["dailyCalories"], 2200);
    }

    #[test]
    fn test_daily_calories_passes_through_uncoerced() {
        let raw = json!({
            "dailyCalories": "about 2000",
            "meals": [{"name": "Dinner", "foods": ["Salmon"]}]
        });

        let plan = validate_diet_plan(&raw).unwrap();
        assert_eq!(plan.daily_calories, json!("about 2000"));
    }

    #[test]
    fn test_missing_meals_is_malformed() {
        let raw = json!({"dailyCalories": 2000});

        let err = validate_diet_plan(&raw).unwrap_err();
        assert!(matches!(err, AppError::MalformedAiOutput(_)));
    }

    #[test]
    fn test_prompts_embed_profile_fields() {
        let profile = UserProfile {
            user_id: "user_1".to_string(),
            age: "30".to_string(),
            height: "180cm".to_string(),
            weight: "80kg".to_string(),
            injuries: "none".to_string(),
            workout_days: "Mon,Wed,Fri".to_string(),
            fitness_goal: "Muscle Gain".to_string(),
            fitness_level: "intermediate".to_string(),
            dietary_restrictions: "vegetarian".to_string(),
        };

        let workout = workout_prompt(&profile);
        assert!(workout.contains("Age: 30"));
        assert!(workout.contains("Available days for workout: Mon,Wed,Fri"));
        assert!(workout.contains("\"sets\": 3"));

        let diet = diet_prompt(&profile);
        assert!(diet.contains("Dietary restrictions: vegetarian"));
        assert!(diet.contains("\"dailyCalories\": 2000"));
    }
}
