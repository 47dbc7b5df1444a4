//! Teams module.
//!
//! Teams group users under shared permissions. Members are invited with
//! roles, which permission strings such as `read("team:{id}/editor")` can
//! refer to.

pub mod models;


use crate::core::call::{Call, Endpoint};
use crate::core::transport::Transport;
use crate::Service;
use models::{
    CreateMembership, CreateTeamRequest, Membership, MembershipList, Preferences, Team, TeamList,
    UpdatePrefsRequest, UpdateRolesRequest, UpdateTeamRequest,
};

const TEAM: &str = "teams/{teamId}";
const MEMBERSHIPS: &str = "teams/{teamId}/memberships";
const MEMBERSHIP: &str = "teams/{teamId}/memberships/{membershipId}";

#[derive(Clone)]
pub struct Teams {
    transport: Transport,
}

impl Service for Teams {
    fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl Teams {
    /// Creates a team. The calling user, if any, joins it with `roles`;
    /// the server defaults to `owner` when `roles` is empty.
    pub fn create_team(&self, team_id: &str, name: &str, roles: &[String]) -> Call<Team> {
        let body = CreateTeamRequest {
            team_id,
            name,
            roles,
        };
        self.transport.json(Endpoint::post("teams").json(&body))
    }

    pub fn list_teams(&self) -> Call<TeamList> {
        self.transport.json(Endpoint::get("teams"))
    }

    pub fn get_team(&self, team_id: &str) -> Call<Team> {
        self.transport
            .json(Endpoint::get(TEAM).path_param("teamId", team_id))
    }

    pub fn update_team(&self, team_id: &str, name: &str) -> Call<Team> {
        self.transport.json(
            Endpoint::put(TEAM)
                .path_param("teamId", team_id)
                .json(&UpdateTeamRequest { name }),
        )
    }

    pub fn delete_team(&self, team_id: &str) -> Call<()> {
        self.transport
            .empty(Endpoint::delete(TEAM).path_param("teamId", team_id))
    }

    pub fn list_memberships(&self, team_id: &str) -> Call<MembershipList> {
        self.transport
            .json(Endpoint::get(MEMBERSHIPS).path_param("teamId", team_id))
    }

    pub fn create_membership(&self, team_id: &str, membership: &CreateMembership) -> Call<Membership> {
        self.transport.json(
            Endpoint::post(MEMBERSHIPS)
                .path_param("teamId", team_id)
                .json(membership),
        )
    }

    pub fn get_membership(&self, team_id: &str, membership_id: &str) -> Call<Membership> {
        self.transport.json(membership(Endpoint::get(MEMBERSHIP), team_id, membership_id))
    }

    /// Replaces the member's roles.
    pub fn update_membership(
        &self,
        team_id: &str,
        membership_id: &str,
        roles: &[String],
    ) -> Call<Membership> {
        self.transport.json(
            membership(Endpoint::patch(MEMBERSHIP), team_id, membership_id)
                .json(&UpdateRolesRequest { roles }),
        )
    }

    pub fn delete_membership(&self, team_id: &str, membership_id: &str) -> Call<()> {
        self.transport
            .empty(membership(Endpoint::delete(MEMBERSHIP), team_id, membership_id))
    }

    /// Replaces the team's shared preferences and returns the stored set.
    pub fn update_prefs(&self, team_id: &str, prefs: &Preferences) -> Call<Preferences> {
        self.transport.json(
            Endpoint::put("teams/{teamId}/prefs")
                .path_param("teamId", team_id)
                .json(&UpdatePrefsRequest { prefs }),
        )
    }
}

fn membership(endpoint: Endpoint, team_id: &str, membership_id: &str) -> Endpoint {
    endpoint
        .path_param("teamId", team_id)
        .path_param("membershipId", membership_id)
}
