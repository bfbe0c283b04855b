use std::{collections::BTreeMap, path::PathBuf};

use chrono::NaiveDate;
use log::{debug, info};
use serde::Deserialize;

use crate::{
    Config, EligibleExerciseSet, Feedback, PlanParseError, PresentError, ScannerData,
    TrainingWeek, UserProfile, WeekTemplate, format_previous_week, parse_plan,
};

#[allow(async_fn_in_trait)]
pub trait LanguageModel {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub prompt: String,
}

/// Prompt template and model settings of one generation flow.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlowConfig {
    pub prompt_template: String,
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub first_week: FlowConfig,
    pub next_week: FlowConfig,
    /// Additional instructions inserted for `{custom_rules}`.
    pub custom_rules: String,
    /// Directory of example programs (`*.txt`) inserted for `{avatars_examples}`.
    pub training_program_examples_dir: Option<PathBuf>,
    /// Expert recommendations inserted for `{merged_recs}`.
    pub recommendations_path: Option<PathBuf>,
}

/// Reference texts shared by both flows, loaded from the paths in [`AssistantConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramReferences {
    pub examples: String,
    pub recommendations: String,
}

static NO_REFERENCES: ProgramReferences = ProgramReferences {
    examples: String::new(),
    recommendations: String::new(),
};

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            first_week: FlowConfig {
                prompt_template: FIRST_WEEK_TEMPLATE.to_string(),
                model: DEFAULT_MODEL.to_string(),
                temperature: 0.2,
            },
            next_week: FlowConfig {
                prompt_template: NEXT_WEEK_TEMPLATE.to_string(),
                model: DEFAULT_MODEL.to_string(),
                temperature: 0.2,
            },
            custom_rules: String::new(),
            training_program_examples_dir: None,
            recommendations_path: None,
        }
    }
}

const DEFAULT_MODEL: &str = "gpt-4o";

const FIRST_WEEK_TEMPLATE: &str = "\
Create the first training week for the user described below.

User data:
{user_data}

Body scan:
{scanner_recommendations}

Age based recommendations:
{age_recommendations}

Expert recommendations:
{merged_recs}

Example programs:
{avatars_examples}

Use only these exercises:
{available_exercises}

Follow this week structure and keep the rest days:
{week_template}

{custom_rules}

Reply with JSON only. Use the day names of the week structure as keys. Every workout day has \
\"day_type\", \"exercises\" (exercise name to {{\"sets\", \"counts\", \"set_rest_time\"}}), \
\"notes\", \"explanations\" and \"rest_time\".";

const NEXT_WEEK_TEMPLATE: &str = "\
Create the next training week for the user described below.

User data:
{user_data}

Previous week:
{previous_week}

Feedback:
{feedback}

Age based recommendations:
{age_recommendations}

Expert recommendations:
{merged_recs}

Example programs:
{avatars_examples}

Use only these exercises:
{available_exercises}

Follow this week structure and keep the rest days:
{week_template}

{custom_rules}

Reply with JSON only, in the same format as the previous week.";

#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Present(#[from] PresentError),
    #[error("failed to serialize week template: {0}")]
    Serialize(serde_json::Error),
    #[error("language model request failed: {0}")]
    Model(Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Parse(#[from] PlanParseError),
}

/// Everything known about a user before a week is generated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanContext {
    pub profile: UserProfile,
    pub today: NaiveDate,
    pub week: WeekTemplate,
    pub eligible: EligibleExerciseSet,
}

/// Renders the prompts of both flows from the configured templates.
#[derive(Debug, Clone, Copy)]
pub struct Prompts<'a> {
    config: &'a Config,
    references: &'a ProgramReferences,
}

impl<'a> Prompts<'a> {
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            references: &NO_REFERENCES,
        }
    }

    #[must_use]
    pub fn with_references(self, references: &'a ProgramReferences) -> Self {
        Self { references, ..self }
    }

    pub fn first_week(
        &self,
        context: &PlanContext,
        scanner: Option<&ScannerData>,
    ) -> Result<String, GenerateError> {
        let mut values = self.common(context)?;
        values.insert(
            "scanner_recommendations",
            scanner
                .map(|data| self.config.scanner_data_formatter.format(data))
                .unwrap_or_default(),
        );
        Ok(render(&self.config.assistant.first_week.prompt_template, &values))
    }

    pub fn next_week(
        &self,
        context: &PlanContext,
        feedback: Feedback,
        previous_week: &TrainingWeek,
    ) -> Result<String, GenerateError> {
        let mut values = self.common(context)?;
        values.insert("previous_week", format_previous_week(previous_week));
        values.insert(
            "feedback",
            self.config
                .feedback
                .format(feedback)
                .map_err(PresentError::from)?
                .to_string(),
        );
        Ok(render(&self.config.assistant.next_week.prompt_template, &values))
    }

    fn common(&self, context: &PlanContext) -> Result<BTreeMap<&'static str, String>, GenerateError> {
        let config = self.config;
        let profile = &context.profile;
        let age = profile.age_on(context.today).map_err(PresentError::from)?;

        let values = BTreeMap::from([
            (
                "week_template",
                serde_json::to_string(&context.week.skeleton).map_err(GenerateError::Serialize)?,
            ),
            (
                "user_data",
                config
                    .user_data_formatter
                    .format(profile, &config.user_data, context.today)?,
            ),
            ("age_recommendations", config.age_based_adjustments.format(age)),
            (
                "available_exercises",
                config.exercises_formatter.format(&context.eligible),
            ),
            ("custom_rules", config.assistant.custom_rules.clone()),
            ("avatars_examples", self.references.examples.clone()),
            ("merged_recs", self.references.recommendations.clone()),
        ]);

        for (name, value) in &values {
            debug!("{name}:\n{value}");
        }

        Ok(values)
    }
}

/// Replace `{name}` with the value of `name` in a single pass.
///
/// Substituted values are not scanned again. `{{` and `}}` produce literal
/// braces, placeholders without a value are kept as they are.
#[must_use]
pub fn render(template: &str, values: &BTreeMap<&str, String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(index) = rest.find(['{', '}']) {
        output.push_str(&rest[..index]);
        let tail = &rest[index..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            output.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        let placeholder = tail
            .strip_prefix('{')
            .and_then(|inner| inner.find('}').map(|end| &inner[..end]));
        if let Some((name, value)) =
            placeholder.and_then(|name| values.get(name).map(|value| (name, value)))
        {
            output.push_str(value);
            rest = &tail[name.len() + 2..];
            continue;
        }

        output.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    output.push_str(rest);
    output
}

/// Generates training weeks through a language model.
pub struct TrainingAssistant<M> {
    model: M,
    config: Config,
    references: ProgramReferences,
}

impl<M: LanguageModel> TrainingAssistant<M> {
    #[must_use]
    pub fn new(model: M, config: Config) -> Self {
        Self {
            model,
            config,
            references: ProgramReferences::default(),
        }
    }

    #[must_use]
    pub fn with_references(self, references: ProgramReferences) -> Self {
        Self { references, ..self }
    }

    fn prompts(&self) -> Prompts<'_> {
        Prompts::new(&self.config).with_references(&self.references)
    }

    pub async fn generate_first_week(
        &self,
        context: &PlanContext,
        scanner: Option<&ScannerData>,
    ) -> Result<TrainingWeek, GenerateError> {
        let prompt = self.prompts().first_week(context, scanner)?;
        let flow = &self.config.assistant.first_week;
        self.generate(flow, prompt).await
    }

    pub async fn generate_next_week(
        &self,
        context: &PlanContext,
        feedback: Feedback,
        previous_week: &TrainingWeek,
    ) -> Result<TrainingWeek, GenerateError> {
        let prompt = self.prompts().next_week(context, feedback, previous_week)?;
        let flow = &self.config.assistant.next_week;
        self.generate(flow, prompt).await
    }

    async fn generate(&self, flow: &FlowConfig, prompt: String) -> Result<TrainingWeek, GenerateError> {
        let output = self
            .model
            .complete(CompletionRequest {
                model: flow.model.clone(),
                temperature: flow.temperature,
                prompt,
            })
            .await
            .map_err(GenerateError::Model)?;
        info!("training plan result:\n{}", output.trim());
        Ok(parse_plan(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        ExerciseFilter, WeekTemplates,
        test_data::{CATALOG, profile},
    };

    struct ScriptedModel {
        reply: Result<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedModel {
        fn new(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.prompt.clone())
                .collect()
        }
    }

    impl LanguageModel for &ScriptedModel {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.requests.lock().unwrap().push(request);
            self.reply.clone().map_err(Into::into)
        }
    }

    fn config() -> Config {
        Config {
            assistant: AssistantConfig {
                first_week: FlowConfig {
                    prompt_template: "W={week_template}\nS={scanner_recommendations}\nE={available_exercises}"
                        .to_string(),
                    model: "first".to_string(),
                    temperature: 0.5,
                },
                next_week: FlowConfig {
                    prompt_template:
                        "F={feedback}\nP={previous_week}\nR={custom_rules}\nX={avatars_examples}\nM={merged_recs}"
                            .to_string(),
                    model: "next".to_string(),
                    temperature: 0.0,
                },
                custom_rules: "No burpees.".to_string(),
                ..AssistantConfig::default()
            },
            ..Config::default()
        }
    }

    fn context() -> PlanContext {
        let week = WeekTemplates::default().select(2).unwrap();
        let eligible = ExerciseFilter::default()
            .eligible(
                &CATALOG,
                "beginner",
                &profile().equipment(),
                &week.day_types,
            )
            .unwrap();
        PlanContext {
            profile: profile(),
            today: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            week,
            eligible,
        }
    }

    const REPLY: &str = "```json\n{\"day 1\": {\"day_type\": \"FULL_BODY\", \"exercises\": {\"Push Up\": {\"sets\": 3, \"counts\": 12, \"set_rest_time\": 60}}, \"rest_time\": 120}, \"day 2\": {\"day_type\": \"REST_DAY\"}}\n```";

    #[rstest]
    #[case::substitutes("Hello {name}!", "Hello Ada!")]
    #[case::repeated("{name} and {name}", "Ada and Ada")]
    #[case::unknown_kept("{name} {unknown}", "Ada {unknown}")]
    #[case::escaped_braces("{{\"key\": \"{name}\"}}", "{\"key\": \"Ada\"}")]
    #[case::value_not_rescanned("{braces}", "{name}")]
    #[case::unbalanced("{name", "{name")]
    #[case::closing_only("a } b", "a } b")]
    fn test_render(#[case] template: &str, #[case] expected: &str) {
        let values = BTreeMap::from([("name", "Ada".to_string()), ("braces", "{name}".to_string())]);

        assert_eq!(render(template, &values), expected);
    }

    #[test]
    fn test_first_week_prompt() {
        let config = config();
        let scanner = ScannerData {
            disclaimer: Some("Estimates only.".into()),
            ..ScannerData::default()
        };
        let prompt = Prompts::new(&config)
            .first_week(&context(), Some(&scanner))
            .unwrap();

        assert!(prompt.starts_with("W={\"day 1\":{\"day_type\":\"FULL_BODY\"}"));
        assert!(prompt.contains("\nS=\nE=Exercises for DAY_TYPE='FULL_BODY':\n"));
        assert!(prompt.contains("\nPush Up | PUSH | Chest | Chest 100%\n"));
        assert!(!prompt.contains("Cable Fly"));
    }

    #[test]
    fn test_next_week_prompt() {
        let config = config();
        let previous = parse_plan(REPLY).unwrap();
        let prompt = Prompts::new(&config)
            .next_week(&context(), Feedback::Hard, &previous)
            .unwrap();

        assert!(prompt.starts_with("F=The user reported that the previous week's workout was 'hard'."));
        assert!(prompt.contains("\nP=Total days: 2\nRest days (1): day 2\n"));
        assert!(prompt.ends_with("\nR=No burpees.\nX=\nM="));
    }

    #[test]
    fn test_prompts_with_references() {
        let config = Config::default();
        let references = ProgramReferences {
            examples: "Program A\n\nProgram B".to_string(),
            recommendations: "Train compound lifts first.".to_string(),
        };
        let prompts = Prompts::new(&config).with_references(&references);
        let previous = parse_plan(REPLY).unwrap();

        for prompt in [
            prompts.first_week(&context(), None).unwrap(),
            prompts
                .next_week(&context(), Feedback::Normal, &previous)
                .unwrap(),
        ] {
            assert!(prompt.contains("Expert recommendations:\nTrain compound lifts first.\n"));
            assert!(prompt.contains("Example programs:\nProgram A\n\nProgram B\n"));
            assert!(!prompt.contains("{avatars_examples}"));
            assert!(!prompt.contains("{merged_recs}"));
        }
    }

    #[test]
    fn test_prompt_user_data_error() {
        let config = config();
        let mut context = context();
        context.profile.weight_type = "oz".into();

        assert!(matches!(
            Prompts::new(&config).first_week(&context, None),
            Err(GenerateError::Present(PresentError::Profile(_)))
        ));
    }

    #[tokio::test]
    async fn test_generate_first_week() {
        let model = ScriptedModel::new(Ok(REPLY));
        let assistant = TrainingAssistant::new(&model, config());

        let week = assistant
            .generate_first_week(&context(), None)
            .await
            .unwrap();

        assert_eq!(week.len(), 2);
        assert_eq!(week.0["day 1"].total_reps(), 36);
        let requests = model.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "first");
        assert_approx_eq!(requests[0].temperature, 0.5);
    }

    #[tokio::test]
    async fn test_generate_next_week() {
        let model = ScriptedModel::new(Ok(REPLY));
        let assistant = TrainingAssistant::new(&model, config()).with_references(
            ProgramReferences {
                examples: "Program A".to_string(),
                recommendations: "Sleep well.".to_string(),
            },
        );
        let previous = parse_plan(REPLY).unwrap();

        assistant
            .generate_next_week(&context(), Feedback::Easy, &previous)
            .await
            .unwrap();

        assert!(model.prompts()[0].contains("workout was 'easy'"));
        assert!(model.prompts()[0].ends_with("\nX=Program A\nM=Sleep well."));
    }

    #[tokio::test]
    async fn test_generate_model_error() {
        let model = ScriptedModel::new(Err("quota exceeded"));
        let assistant = TrainingAssistant::new(&model, config());

        let err = assistant
            .generate_first_week(&context(), None)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "language model request failed: quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_generate_invalid_reply() {
        let model = ScriptedModel::new(Ok("I cannot do that."));
        let assistant = TrainingAssistant::new(&model, config());

        assert!(matches!(
            assistant.generate_first_week(&context(), None).await,
            Err(GenerateError::Parse(PlanParseError { ref output, .. })) if output == "I cannot do that."
        ));
    }
}
