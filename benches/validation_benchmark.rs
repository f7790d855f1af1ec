use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flexcoach::services::plan::{validate_diet_plan, validate_workout_plan};
use serde_json::{json, Value};

/// A realistic seven-day model response with messy count fields.
fn workout_fixture() -> Value {
    let days = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    let exercises: Vec<Value> = days
        .iter()
        .map(|day| {
            json!({
                "day": day,
                "notes": "focus on form",
                "routines": [
                    {"name": "Bench Press", "sets": 3, "reps": 10, "rest": "90s"},
                    {"name": "Incline Dumbbell Press", "sets": "4", "reps": "8"},
                    {"name": "Cable Fly", "sets": 3, "reps": "to failure"},
                    {"name": "Treadmill", "sets": 1, "reps": 1}
                ]
            })
        })
        .collect();

    json!({
        "schedule": days,
        "difficulty": "intermediate",
        "exercises": exercises
    })
}

fn diet_fixture() -> Value {
    json!({
        "dailyCalories": 2400,
        "macros": {"protein": 180, "carbs": 250, "fat": 70},
        "meals": [
            {"name": "Breakfast", "foods": ["Oatmeal", "Eggs", "Berries"]},
            {"name": "Lunch", "foods": ["Chicken breast", "Rice", "Broccoli"]},
            {"name": "Dinner", "foods": ["Salmon", "Sweet potato", "Salad"]},
            {"name": "Snack", "foods": ["Greek yogurt", "Almonds"]}
        ]
    })
}

fn benchmark_validation(c: &mut Criterion) {
    let workout = workout_fixture();
    let diet = diet_fixture();

    let mut group = c.benchmark_group("plan_validation");

    group.bench_function("workout_projection", |b| {
        b.iter(|| validate_workout_plan(black_box(&workout)))
    });

    group.bench_function("diet_projection", |b| {
        b.iter(|| validate_diet_plan(black_box(&diet)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_validation);
criterion_main!(benches);
