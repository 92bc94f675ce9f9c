// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use s3sign_core::Error;
use serde::{Deserialize, Serialize};

/// S3 regions this signer knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// US East (N. Virginia)
    #[serde(rename = "us-east-1")]
    UsEast1,
    /// US East (Ohio)
    #[serde(rename = "us-east-2")]
    UsEast2,
    /// US West (N. California)
    #[serde(rename = "us-west-1")]
    UsWest1,
    /// US West (Oregon)
    #[serde(rename = "us-west-2")]
    UsWest2,
    /// Canada (Central)
    #[serde(rename = "ca-central-1")]
    CaCentral1,
    /// EU (Frankfurt)
    #[serde(rename = "eu-central-1")]
    EuCentral1,
    /// EU (Ireland)
    #[serde(rename = "eu-west-1")]
    EuWest1,
    /// EU (London)
    #[serde(rename = "eu-west-2")]
    EuWest2,
    /// EU (Paris)
    #[serde(rename = "eu-west-3")]
    EuWest3,
    /// Asia Pacific (Tokyo)
    #[serde(rename = "ap-northeast-1")]
    ApNortheast1,
    /// Asia Pacific (Seoul)
    #[serde(rename = "ap-northeast-2")]
    ApNortheast2,
    /// Asia Pacific (Osaka-Local)
    #[serde(rename = "ap-northeast-3")]
    ApNortheast3,
    /// Asia Pacific (Singapore)
    #[serde(rename = "ap-southeast-1")]
    ApSoutheast1,
    /// Asia Pacific (Sydney)
    #[serde(rename = "ap-southeast-2")]
    ApSoutheast2,
    /// Asia Pacific (Mumbai)
    #[serde(rename = "ap-south-1")]
    ApSouth1,
    /// South America (São Paulo)
    #[serde(rename = "sa-east-1")]
    SaEast1,
}

impl Region {
    /// Every known region.
    pub const ALL: [Region; 16] = [
        Region::UsEast1,
        Region::UsEast2,
        Region::UsWest1,
        Region::UsWest2,
        Region::CaCentral1,
        Region::EuCentral1,
        Region::EuWest1,
        Region::EuWest2,
        Region::EuWest3,
        Region::ApNortheast1,
        Region::ApNortheast2,
        Region::ApNortheast3,
        Region::ApSoutheast1,
        Region::ApSoutheast2,
        Region::ApSouth1,
        Region::SaEast1,
    ];

    /// Region code as published by AWS, e.g. `eu-west-3`.
    pub fn code(&self) -> &'static str {
        match self {
            Region::UsEast1 => "us-east-1",
            Region::UsEast2 => "us-east-2",
            Region::UsWest1 => "us-west-1",
            Region::UsWest2 => "us-west-2",
            Region::CaCentral1 => "ca-central-1",
            Region::EuCentral1 => "eu-central-1",
            Region::EuWest1 => "eu-west-1",
            Region::EuWest2 => "eu-west-2",
            Region::EuWest3 => "eu-west-3",
            Region::ApNortheast1 => "ap-northeast-1",
            Region::ApNortheast2 => "ap-northeast-2",
            Region::ApNortheast3 => "ap-northeast-3",
            Region::ApSoutheast1 => "ap-southeast-1",
            Region::ApSoutheast2 => "ap-southeast-2",
            Region::ApSouth1 => "ap-south-1",
            Region::SaEast1 => "sa-east-1",
        }
    }

    /// Base host of the regional S3 endpoint: `s3.<code>.amazonaws.com`.
    ///
    /// Used as the `Host` header when the target url carries no authority.
    pub fn host(&self) -> String {
        format!("s3.{}.amazonaws.com", self.code())
    }

    /// Base url of the regional S3 endpoint, always ending with `/`.
    pub fn endpoint(&self) -> String {
        format!("https://{}/", self.host())
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or_else(|| Error::config_invalid(format!("unknown region: {s}")))
    }
}
