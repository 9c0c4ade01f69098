#![allow(dead_code)]

use std::cell::Cell;

use serde_json::{Value, json};

use doryctl_core::document::Document;
use doryctl_core::error::RemoteError;
use doryctl_core::provider::DefinitionProvider;

/// `data.project` of a typical projectDef response.
pub fn project_json() -> Value {
    json!({
        "projectInfo": {"projectName": "test-project1", "projectDesc": "demo project"},
        "projectDef": {
            "buildDefs": [
                {
                    "buildName": "svc-a",
                    "buildEnv": "maven-jdk8",
                    "buildPath": "svc-a",
                    "buildPhaseID": 1,
                    "buildCmds": ["mvn clean", "mvn package"]
                },
                {
                    "buildName": "svc-b",
                    "buildEnv": "golang-1.17",
                    "buildPath": "svc-b",
                    "buildPhaseID": 2,
                    "buildCmds": ["go build"]
                },
                {
                    "buildName": "svc-c",
                    "buildEnv": "node-16",
                    "buildPath": "svc-c",
                    "buildPhaseID": 2,
                    "buildCmds": null
                }
            ],
            "packageDefs": [
                {"packageName": "pkg-a", "relatedBuilds": ["svc-a"], "packageFrom": "openjdk:8", "packages": ["target/*.jar"]},
                {"packageName": "pkg-b", "relatedBuilds": ["svc-b"], "packageFrom": "alpine:3.15", "packages": ["svc-b"]},
                {"packageName": "pkg-c", "relatedBuilds": ["svc-c"], "packageFrom": "nginx:1.21", "packages": ["dist"]}
            ],
            "errMsgPackageDefs": "packageDefs[0] relatedBuilds svc-x not exists",
            "dockerIgnoreDefs": [".git", "node_modules"],
            "customOpsDefs": [
                {"customOpsName": "release", "customOpsDesc": "build and deploy", "customOpsSteps": ["build", "packageImage", "deploy"]},
                {"customOpsName": "hotfix", "customOpsDesc": "deploy only", "customOpsSteps": ["deploy"]},
                {"customOpsName": "scan", "customOpsDesc": "scan code", "customOpsSteps": ["scanCode"]}
            ],
            "customStepDefs": {
                "scanCode": {
                    "enableMode": "",
                    "customStepModuleDefs": [
                        {"moduleName": "svc-a", "manualEnable": true, "paramInputYaml": "level: high"},
                        {"moduleName": "svc-b"},
                        {"moduleName": "svc-c", "manualEnable": true}
                    ]
                }
            }
        },
        "projectAvailableEnvs": [
            {
                "envName": "test",
                "deployContainerDefs": [
                    {
                        "deployName": "svc-a",
                        "relatedPackage": "pkg-a",
                        "deployReplicas": 2,
                        "deployLocalPorts": [{"port": 8080, "protocol": "TCP"}],
                        "dependServices": [{"dependName": "mysql", "dependPort": 3306, "dependType": "TCP"}]
                    },
                    {
                        "deployName": "svc-b",
                        "relatedPackage": "pkg-b",
                        "deployReplicas": 1,
                        "deployLocalPorts": null,
                        "dependServices": null
                    },
                    {
                        "deployName": "svc-c",
                        "relatedPackage": "pkg-c",
                        "deployReplicas": 1,
                        "deployLocalPorts": [{"port": 80}]
                    }
                ],
                "customStepDefs": {
                    "testApi": {
                        "enableMode": "on",
                        "customStepModuleDefs": [
                            {"moduleName": "svc-b", "relatedStepModules": ["svc-a"]}
                        ]
                    }
                },
                "errMsgCustomStepDefs": {"testApi": "testApi svc-c not exists"}
            }
        ],
        "projectPipelines": [
            {
                "branchName": "master",
                "envs": ["test"],
                "envProductions": ["prod"],
                "pipelineDef": {
                    "isAutoDetectBuild": true,
                    "isQueue": false,
                    "builds": [{"name": "svc-a", "run": true}, {"name": "svc-b", "run": false}]
                }
            }
        ],
        "customStepConfs": [
            {
                "customStepName": "scanCode",
                "customStepDesc": "code scan",
                "customStepActionDesc": "run scanner",
                "isEnvDiff": false,
                "paramInputYamlDef": "level: string"
            }
        ]
    })
}

pub fn document() -> Document {
    serde_json::from_value(project_json()).unwrap()
}

/// Full HTTP response body wrapping [`project_json`].
pub fn response_body() -> Value {
    json!({
        "status": "SUCCESS",
        "msg": "get project definition success",
        "duration": "12.3ms",
        "data": {"project": project_json()}
    })
}

/// Serves a fixed document and counts how often it was asked.
pub struct FixtureProvider {
    document: Document,
    calls: Cell<usize>,
}

impl FixtureProvider {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DefinitionProvider for FixtureProvider {
    fn fetch_project_definition(&self, _project_name: &str) -> Result<Document, RemoteError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.document.clone())
    }
}
