use agent_manager_core::application::build_ci_manager::{
    BuildCallbackError, BuildCiManagerService, LookupStage, StandardBuildCiManagerService,
};
use agent_manager_core::domain::agent::{Agent, AgentDetails};
use agent_manager_core::domain::organization::{Organization, OrganizationId, Project};
use agent_manager_core::domain::repository::{
    OrganizationRepository, ProjectRepository, AgentRepository, RepositoryError,
};
use agent_manager_core::domain::workload::Workload;
use agent_manager_core::infrastructure::repositories::{
    InMemoryAgentRepository, InMemoryOrganizationRepository, InMemoryProjectRepository,
};
use agent_manager_core::infrastructure::workload_encoder::{EncodingError, WorkloadEncoder};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

struct Fixture {
    organizations: Arc<InMemoryOrganizationRepository>,
    projects: Arc<InMemoryProjectRepository>,
    agents: Arc<InMemoryAgentRepository>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            organizations: Arc::new(InMemoryOrganizationRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            agents: Arc::new(InMemoryAgentRepository::new()),
        }
    }

    /// Seeds org "Acme Corp" (deployment-plane name "acme") with project "shop"
    async fn with_agent(details: Option<AgentDetails>) -> Self {
        let fixture = Self::new();
        let org = Organization::new("Acme Corp", "acme");
        let project = Project::new(org.id, "shop");
        let agent = Agent::new(org.id, project.id, "checkout", details);

        fixture.organizations.save(&org).await.unwrap();
        fixture.projects.save(&project).await.unwrap();
        fixture.agents.save(&agent).await.unwrap();
        fixture
    }

    async fn with_spec(spec: Value) -> Self {
        Self::with_agent(Some(AgentDetails {
            workload_spec: spec.as_object().cloned(),
        }))
        .await
    }

    fn service(&self) -> StandardBuildCiManagerService {
        StandardBuildCiManagerService::new(
            self.organizations.clone(),
            self.projects.clone(),
            self.agents.clone(),
        )
    }
}

fn parse(yaml: &str) -> Workload {
    serde_yaml::from_str(yaml).expect("callback must return a Workload document")
}

#[tokio::test]
async fn test_checkout_scenario() {
    let fixture = Fixture::with_spec(json!({
        "envVars": [{"key": "A", "value": "1"}],
        "endpoints": [{"name": "ep1", "type": "REST", "port": 8080, "schemaContent": "openapi: 3.0"}]
    }))
    .await;

    let yaml = fixture
        .service()
        .handle_build_callback("acme", "shop", "checkout")
        .await
        .unwrap();
    let workload = parse(&yaml);

    assert_eq!(workload.metadata.name, "checkout-workload");
    assert_eq!(workload.metadata.namespace, "acme");
    assert_eq!(workload.spec.owner.project_name, "shop");
    assert_eq!(workload.spec.owner.component_name, "checkout");

    let container = workload.main_container().unwrap();
    assert_eq!(container.image, "IMAGE_TAG");
    assert_eq!(container.env.len(), 1);
    assert_eq!(container.env[0].key, "A");
    assert_eq!(container.env[0].value, "1");

    let endpoint = workload.endpoint("ep1").unwrap();
    assert_eq!(endpoint.endpoint_type.as_str(), "REST");
    assert_eq!(endpoint.port, 8080);
    let schema = endpoint.schema.as_ref().unwrap();
    assert_eq!(schema.schema_type, "REST");
    assert_eq!(schema.content, "openapi: 3.0");
}

#[tokio::test]
async fn test_float_port_and_schema_path_placeholder() {
    let fixture = Fixture::with_spec(json!({
        "endpoints": [
            {"name": "ep2", "type": "GRPC", "port": 9090.0},
            {"name": "docs", "type": "REST", "port": 80, "schemaPath": "openapi.yaml"}
        ]
    }))
    .await;

    let yaml = fixture
        .service()
        .handle_build_callback("acme", "shop", "checkout")
        .await
        .unwrap();
    let workload = parse(&yaml);

    assert_eq!(workload.endpoint("ep2").unwrap().port, 9090);
    assert!(workload.endpoint("ep2").unwrap().schema.is_none());
    assert_eq!(
        workload.endpoint("docs").unwrap().schema.as_ref().unwrap().content,
        "SCHEMA_CONTENT"
    );
}

#[tokio::test]
async fn test_empty_specification_renders_best_effort_manifest() {
    let fixture = Fixture::with_spec(json!({"envVars": "oops", "endpoints": [1, 2, 3]})).await;

    let yaml = fixture
        .service()
        .handle_build_callback("acme", "shop", "checkout")
        .await
        .unwrap();
    let workload = parse(&yaml);

    assert!(workload.main_container().unwrap().env.is_empty());
    assert!(workload.spec.template.endpoints.is_empty());
}

#[tokio::test]
async fn test_not_found_errors_name_the_missing_entity() {
    let fixture = Fixture::with_spec(json!({})).await;
    let service = fixture.service();

    let err = service.handle_build_callback("globex", "shop", "checkout").await.unwrap_err();
    assert!(matches!(err, BuildCallbackError::OrganizationNotFound(_)));
    assert_eq!(err.to_string(), "organization not found: globex");

    let err = service.handle_build_callback("acme", "blog", "checkout").await.unwrap_err();
    assert!(matches!(err, BuildCallbackError::ProjectNotFound(_)));
    assert_eq!(err.to_string(), "project not found: blog");

    let err = service.handle_build_callback("acme", "shop", "cart").await.unwrap_err();
    assert!(matches!(err, BuildCallbackError::AgentNotFound(_)));
    assert_eq!(err.to_string(), "agent not found: cart");
}

#[tokio::test]
async fn test_display_name_does_not_resolve_organization() {
    let fixture = Fixture::with_spec(json!({})).await;

    let err = fixture
        .service()
        .handle_build_callback("Acme Corp", "shop", "checkout")
        .await
        .unwrap_err();
    assert!(matches!(err, BuildCallbackError::OrganizationNotFound(_)));
}

#[tokio::test]
async fn test_missing_workload_spec() {
    for details in [None, Some(AgentDetails::default())] {
        let fixture = Fixture::with_agent(details).await;

        let err = fixture
            .service()
            .handle_build_callback("acme", "shop", "checkout")
            .await
            .unwrap_err();
        assert!(matches!(err, BuildCallbackError::MissingWorkloadSpec(_)));
        assert_eq!(
            err.to_string(),
            "agent workload specification is missing for agent: checkout"
        );
    }
}

struct BrokenProjectRepository;

#[async_trait]
impl ProjectRepository for BrokenProjectRepository {
    async fn save(&self, _project: &Project) -> Result<(), RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }

    async fn find_by_name(
        &self,
        _org_id: OrganizationId,
        _name: &str,
    ) -> Result<Option<Project>, RepositoryError> {
        Err(RepositoryError::Database("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_storage_failure_is_wrapped_with_stage() {
    let fixture = Fixture::with_spec(json!({})).await;
    let service = StandardBuildCiManagerService::new(
        fixture.organizations.clone(),
        Arc::new(BrokenProjectRepository),
        fixture.agents.clone(),
    );

    let err = service.handle_build_callback("acme", "shop", "checkout").await.unwrap_err();
    match &err {
        BuildCallbackError::Lookup { stage, .. } => {
            assert_eq!(stage, &LookupStage::Project("shop".to_string()));
        }
        other => panic!("expected lookup failure, got {:?}", other),
    }
    assert!(!err.is_not_found());
    assert_eq!(
        err.to_string(),
        "failed to find project shop: Database error: connection refused"
    );
}

struct FailingEncoder;

impl WorkloadEncoder for FailingEncoder {
    fn encode(&self, _workload: &Workload) -> Result<String, EncodingError> {
        let err = serde_yaml::from_str::<u8>("not a number").unwrap_err();
        Err(EncodingError::Yaml(err))
    }
}

#[tokio::test]
async fn test_encoding_failure_yields_empty_document() {
    let fixture = Fixture::with_spec(json!({"envVars": [{"key": "A", "value": "1"}]})).await;
    let service = StandardBuildCiManagerService::with_encoder(
        fixture.organizations.clone(),
        fixture.projects.clone(),
        fixture.agents.clone(),
        Arc::new(FailingEncoder),
    );

    let yaml = service.handle_build_callback("acme", "shop", "checkout").await.unwrap();
    assert_eq!(yaml, "");
}

#[tokio::test]
async fn test_concurrent_callbacks_are_independent() {
    let fixture = Fixture::with_spec(json!({"envVars": [{"key": "A", "value": "1"}]})).await;
    let service: Arc<dyn BuildCiManagerService> = Arc::new(fixture.service());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move {
                service.handle_build_callback("acme", "shop", "checkout").await
            })
        })
        .collect();

    let mut outputs = Vec::new();
    for handle in handles {
        outputs.push(handle.await.unwrap().unwrap());
    }
    assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}
